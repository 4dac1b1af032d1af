//! Cruise Target Settings
//!
//! # Settings
//!
//! - `MTSCEnabled` - Limit speed for map turns
//! - `MTSCCurvatureCheck` - Only start limiting once the road curves
//! - `SpeedLimitController` - Follow the desired speed limit
//! - `SLCConfirmation` - Speed-limit changes need driver confirmation

use super::error::ParameterError;
use super::load::load_bool;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::cruise::{CruiseSettings, TurnSpeedSettings};

/// Cruise settings loaded from the store
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CruiseParams {
    pub cruise: CruiseSettings,
}

impl CruiseParams {
    /// Register cruise settings with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        for name in [
            "MTSCEnabled",
            "MTSCCurvatureCheck",
            "SpeedLimitController",
            "SLCConfirmation",
        ] {
            store.register(name, ParamValue::Bool(false), ParamFlags::empty())?;
        }
        Ok(())
    }

    /// Load cruise settings from the store
    pub fn from_store(store: &ParameterStore) -> Self {
        Self {
            cruise: CruiseSettings {
                turn_speed: TurnSpeedSettings {
                    enabled: load_bool(store, "MTSCEnabled", false),
                    curvature_check: load_bool(store, "MTSCCurvatureCheck", false),
                },
                speed_limit: load_bool(store, "SpeedLimitController", false),
                speed_limit_confirmation: load_bool(store, "SLCConfirmation", false),
            },
        }
    }
}
