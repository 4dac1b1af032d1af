//! Immutable planner configuration
//!
//! Built from the settings store once per settings change and passed by
//! reference into every stage of the cycle.

use crate::accel::AccelSettings;
use crate::cruise::CruiseSettings;
use crate::follow::FollowSettings;
use crate::mode::ModeSettings;
use crate::parameters::{
    ConditionalParams, CruiseParams, GeneralParams, LongitudinalParams, ParameterStore,
};

/// Settings snapshot for one or more planning cycles
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlannerConfig {
    pub general: GeneralParams,
    pub accel: AccelSettings,
    pub follow: FollowSettings,
    pub mode: ModeSettings,
    pub cruise: CruiseSettings,
}

impl PlannerConfig {
    /// Load every settings block from the store
    ///
    /// Missing keys fall back to defaults.
    pub fn from_store(store: &ParameterStore) -> Self {
        let general = GeneralParams::from_store(store);
        let longitudinal = LongitudinalParams::from_store(store, general.is_metric);
        let conditional = ConditionalParams::from_store(store, general.is_metric);
        let cruise = CruiseParams::from_store(store);

        let mut follow = longitudinal.follow;
        follow.conditional_mode = conditional.mode.enabled;

        Self {
            general,
            accel: longitudinal.accel,
            follow,
            mode: conditional.mode,
            cruise: cruise.cruise,
        }
    }
}
