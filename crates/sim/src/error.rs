use adaptive_long_core::parameters::ParameterError;
use adaptive_long_core::ConfigError;

/// Errors raised by the simulation harness.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(ConfigError),

    #[error("Setting {name}: {error}")]
    Setting {
        name: String,
        error: ParameterError,
    },

    #[error("Invalid scenario: {0}")]
    Scenario(String),
}

impl From<ConfigError> for SimError {
    fn from(error: ConfigError) -> Self {
        Self::Config(error)
    }
}
