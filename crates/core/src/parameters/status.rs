//! Runtime Status Settings
//!
//! Volatile keys exchanged with the display side at runtime.
//!
//! # Settings
//!
//! - `CEStatus` - Conditional mode status code (read-only outside the planner)
//! - `SLCConfirmed` - One-shot driver confirmation of a new speed limit

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::mode::ModeDecision;

/// Conditional mode status key
pub const CE_STATUS: &str = "CEStatus";

/// Speed-limit confirmation key
pub const SLC_CONFIRMED: &str = "SLCConfirmed";

/// Register the status keys
pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
    store.register(
        CE_STATUS,
        ParamValue::Int(0),
        ParamFlags::VOLATILE | ParamFlags::READ_ONLY,
    )?;
    store.register(SLC_CONFIRMED, ParamValue::Bool(false), ParamFlags::VOLATILE)?;
    Ok(())
}

/// Publish the decision's status code to `CEStatus`
pub fn publish_status(store: &mut ParameterStore, decision: &ModeDecision) -> Result<(), ParameterError> {
    store.force_set(CE_STATUS, ParamValue::Int(i32::from(decision.status_code())))
}

/// Current value of `SLCConfirmed`, false if missing
pub fn speed_limit_confirmed(store: &ParameterStore) -> bool {
    store.get_bool(SLC_CONFIRMED).unwrap_or(false)
}

/// Reset `SLCConfirmed` after the confirmation was used
pub fn clear_speed_limit_confirmation(store: &mut ParameterStore) -> Result<(), ParameterError> {
    store.set(SLC_CONFIRMED, ParamValue::Bool(false))
}
