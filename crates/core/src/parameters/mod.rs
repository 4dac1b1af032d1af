//! Settings store and typed settings blocks
//!
//! Every block registers its keys with defaults and loads itself back from
//! the store with range clamping. Out-of-range or mistyped values fall back
//! to defaults instead of failing the planning cycle.

pub mod conditional;
pub mod cruise;
pub mod error;
pub mod general;
mod load;
pub mod longitudinal;
pub mod status;
pub mod storage;

pub use conditional::ConditionalParams;
pub use cruise::CruiseParams;
pub use error::ParameterError;
pub use general::{display_to_ms, GeneralParams};
pub use longitudinal::LongitudinalParams;
pub use status::{CE_STATUS, SLC_CONFIRMED};
pub use storage::{ParamFlags, ParamMetadata, ParamValue, ParameterStore};
pub use storage::{MAX_PARAMS, PARAM_NAME_LEN};

/// Register every settings block with default values
///
/// Registration is idempotent, existing values are kept.
pub fn register_all(store: &mut ParameterStore) -> Result<(), ParameterError> {
    GeneralParams::register_defaults(store)?;
    LongitudinalParams::register_defaults(store)?;
    ConditionalParams::register_defaults(store)?;
    CruiseParams::register_defaults(store)?;
    status::register_defaults(store)?;
    Ok(())
}
