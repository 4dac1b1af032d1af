//! Settings error types
//!
//! Provides error types for settings store operations.

/// Errors from settings store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterError {
    /// Invalid configuration (e.g., unknown setting, name too long)
    InvalidConfig,
    /// Store is full
    StoreFull,
    /// Read-only setting cannot be modified
    ReadOnly,
    /// Value type differs from the registered type
    TypeMismatch,
}

impl core::fmt::Display for ParameterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParameterError::InvalidConfig => write!(f, "invalid setting configuration"),
            ParameterError::StoreFull => write!(f, "settings store full"),
            ParameterError::ReadOnly => write!(f, "setting is read-only"),
            ParameterError::TypeMismatch => write!(f, "setting type mismatch"),
        }
    }
}
