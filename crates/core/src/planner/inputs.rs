//! Per-cycle input snapshot

use serde::{Deserialize, Serialize};

use crate::constants::V_CRUISE_UNSET;
use crate::geometry::{LaneModel, PathPrediction};
use crate::vehicle::{EgoState, LeadState, NavigationFlags, Personality};

/// State reported by the controls layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsState {
    /// Longitudinal control engaged
    pub enabled: bool,
    /// Experimental mode selected by the driver or by conditional mode
    pub experimental_mode: bool,
    pub personality: Personality,
    /// Set speed (km/h), `V_CRUISE_UNSET` when not set
    pub v_cruise_kph: f32,
    pub traffic_mode: bool,
    /// Upstream inputs passed their own validity checks
    pub inputs_valid: bool,
    /// Driver confirmed the pending speed limit
    pub speed_limit_confirmed: bool,
}

impl Default for ControlsState {
    fn default() -> Self {
        Self {
            enabled: false,
            experimental_mode: false,
            personality: Personality::Standard,
            v_cruise_kph: V_CRUISE_UNSET,
            traffic_mode: false,
            inputs_valid: true,
            speed_limit_confirmed: false,
        }
    }
}

/// Everything one planning cycle reads
///
/// Treated as immutable for the duration of the cycle.
#[derive(Debug, Clone, Default)]
pub struct CycleInputs {
    pub ego: EgoState,
    pub lead: LeadState,
    pub path: PathPrediction,
    pub lanes: LaneModel,
    pub navigation: NavigationFlags,
    /// Map turn speed (m/s), `None` when no turn is known
    pub map_turn_speed: Option<f32>,
    /// Desired speed limit with offset (m/s), 0 when unknown
    pub desired_speed_limit: f32,
    pub controls: ControlsState,
}
