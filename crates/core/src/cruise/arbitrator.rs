//! Cruise target arbitration
//!
//! Combines the set speed with the turn-speed and speed-limit candidates.
//! A candidate at or below `CRUISING_SPEED` means "not limiting" and is
//! replaced by the set speed, so it can never win the minimum.

use super::speed_limit::SpeedLimitGate;
use super::turn_speed::{TurnSpeedInputs, TurnSpeedLimiter, TurnSpeedSettings};
use crate::constants::{CRUISING_SPEED, KPH_TO_MS, V_CRUISE_UNSET};
use crate::math::clip;

/// Set speed in m/s from the controls layer's km/h value.
///
/// Values at or above `V_CRUISE_UNSET` mean "unset" and are capped there;
/// negative or NaN values give 0.
pub fn base_cruise(v_cruise_kph: f32) -> f32 {
    if v_cruise_kph.is_nan() {
        return 0.0;
    }
    (v_cruise_kph.min(V_CRUISE_UNSET) * KPH_TO_MS).max(0.0)
}

/// Min-with-floor arbitration.
///
/// Candidates `<= CRUISING_SPEED` (or NaN) are replaced by `v_cruise`; the
/// result is their minimum clamped to `[0, v_cruise]`. With no valid
/// candidate the result is exactly `v_cruise`.
pub fn arbitrate(candidates: &[f32], v_cruise: f32) -> f32 {
    let v_cruise = v_cruise.max(0.0);
    let target = candidates
        .iter()
        .map(|&candidate| {
            if candidate > CRUISING_SPEED {
                candidate
            } else {
                v_cruise
            }
        })
        .fold(v_cruise, f32::min);
    clip(target, 0.0, v_cruise)
}

/// Cruise feature toggles
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CruiseSettings {
    pub turn_speed: TurnSpeedSettings,
    /// Speed-limit control enabled
    pub speed_limit: bool,
    /// Speed-limit changes need driver confirmation
    pub speed_limit_confirmation: bool,
}

/// Per-cycle inputs
#[derive(Debug, Clone, Copy, Default)]
pub struct CruiseInputs {
    /// Ego speed (m/s)
    pub v_ego: f32,
    /// Ego speed shown on the cluster (m/s, never below `v_ego`)
    pub v_ego_cluster: f32,
    /// Set speed in km/h as reported by the controls layer
    pub v_cruise_kph: f32,
    pub engaged: bool,
    /// Map turn speed (m/s), if any
    pub map_turn_speed: Option<f32>,
    /// Desired speed limit including offset (m/s, 0 when unknown)
    pub desired_speed_limit: f32,
    /// Road curvature (1/m)
    pub road_curvature: f32,
    /// Driver confirmed the pending speed limit
    pub speed_limit_confirmed: bool,
}

/// Arbitration result
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CruiseOutput {
    /// Arbitrated target (m/s)
    pub target: f32,
    /// Set speed (m/s)
    pub v_cruise: f32,
    /// Turn-speed candidate (m/s)
    pub turn_speed_target: f32,
    /// Accepted speed limit (m/s, 0 when inactive)
    pub speed_limit_target: f32,
    /// Desired speed limit before confirmation (m/s)
    pub unconfirmed_speed_limit: f32,
    /// The confirmation flag was consumed this cycle
    pub confirmation_consumed: bool,
}

/// Owns the turn-speed and speed-limit state
#[derive(Debug, Clone, Default)]
pub struct CruiseTargetArbitrator {
    turn_speed: TurnSpeedLimiter,
    speed_limit: SpeedLimitGate,
}

impl CruiseTargetArbitrator {
    pub const fn new() -> Self {
        Self {
            turn_speed: TurnSpeedLimiter::new(),
            speed_limit: SpeedLimitGate::new(),
        }
    }

    /// Previous turn-speed target is still below the set speed
    pub fn turn_speed_pending(&self, v_cruise_kph: f32) -> bool {
        self.turn_speed.is_limiting(base_cruise(v_cruise_kph))
    }

    /// Update the candidates and arbitrate.
    pub fn update(&mut self, settings: &CruiseSettings, inputs: &CruiseInputs) -> CruiseOutput {
        let v_cruise = base_cruise(inputs.v_cruise_kph);
        let cruise_set = inputs.v_cruise_kph.is_finite() && inputs.v_cruise_kph < V_CRUISE_UNSET;
        let v_ego_diff = (inputs.v_ego_cluster.max(inputs.v_ego) - inputs.v_ego).max(0.0);

        let turn_speed_target = self.turn_speed.update(
            &settings.turn_speed,
            &TurnSpeedInputs {
                engaged: inputs.engaged,
                v_ego: inputs.v_ego,
                v_cruise,
                cruise_set,
                map_turn_speed: inputs.map_turn_speed,
                road_curvature: inputs.road_curvature,
            },
        );

        let unconfirmed_speed_limit = if settings.speed_limit {
            inputs.desired_speed_limit.max(0.0)
        } else {
            0.0
        };
        let outcome = self.speed_limit.update(
            settings.speed_limit,
            settings.speed_limit_confirmation,
            inputs.desired_speed_limit,
            inputs.speed_limit_confirmed,
        );

        let target = arbitrate(
            &[turn_speed_target, outcome.target - v_ego_diff],
            v_cruise,
        );

        CruiseOutput {
            target,
            v_cruise,
            turn_speed_target,
            speed_limit_target: outcome.target,
            unconfirmed_speed_limit,
            confirmation_consumed: outcome.confirmation_consumed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_cruise_conversion() {
        assert!((base_cruise(54.0) - 15.0).abs() < 1e-5);
        assert!((base_cruise(300.0) - V_CRUISE_UNSET * KPH_TO_MS).abs() < 1e-4);
        assert_eq!(base_cruise(-10.0), 0.0);
        assert_eq!(base_cruise(f32::NAN), 0.0);
    }

    #[test]
    fn test_all_candidates_below_floor_gives_base() {
        assert_eq!(arbitrate(&[0.0, 3.0, CRUISING_SPEED], 15.0), 15.0);
        assert_eq!(arbitrate(&[], 15.0), 15.0);
    }

    #[test]
    fn test_minimum_of_valid_candidates() {
        assert_eq!(arbitrate(&[12.0, 0.0, 9.0], 15.0), 9.0);
    }

    #[test]
    fn test_result_clamped_to_cruise() {
        assert_eq!(arbitrate(&[30.0], 15.0), 15.0);
        assert_eq!(arbitrate(&[f32::NAN], 15.0), 15.0);
    }

    #[test]
    fn test_no_limits_follows_set_speed() {
        let mut arbitrator = CruiseTargetArbitrator::new();
        let output = arbitrator.update(
            &CruiseSettings::default(),
            &CruiseInputs {
                v_ego: 10.0,
                v_ego_cluster: 10.0,
                v_cruise_kph: 54.0,
                engaged: true,
                ..Default::default()
            },
        );
        assert!((output.target - 15.0).abs() < 1e-5);
        assert_eq!(output.speed_limit_target, 0.0);
    }

    #[test]
    fn test_speed_limit_offset_by_cluster_difference() {
        let mut arbitrator = CruiseTargetArbitrator::new();
        let settings = CruiseSettings {
            speed_limit: true,
            ..Default::default()
        };
        let output = arbitrator.update(
            &settings,
            &CruiseInputs {
                v_ego: 20.0,
                v_ego_cluster: 20.5,
                v_cruise_kph: 108.0,
                engaged: true,
                desired_speed_limit: 22.0,
                ..Default::default()
            },
        );
        assert!((output.target - 21.5).abs() < 1e-5);
        assert_eq!(output.speed_limit_target, 22.0);
        assert_eq!(output.unconfirmed_speed_limit, 22.0);
    }

    #[test]
    fn test_confirmation_holds_previous_limit() {
        let mut arbitrator = CruiseTargetArbitrator::new();
        let settings = CruiseSettings {
            speed_limit: true,
            speed_limit_confirmation: true,
            ..Default::default()
        };
        let mut inputs = CruiseInputs {
            v_ego: 20.0,
            v_ego_cluster: 20.0,
            v_cruise_kph: 108.0,
            engaged: true,
            desired_speed_limit: 22.0,
            ..Default::default()
        };
        arbitrator.update(&settings, &inputs);

        inputs.desired_speed_limit = 13.0;
        let output = arbitrator.update(&settings, &inputs);
        assert_eq!(output.target, 22.0);
        assert_eq!(output.unconfirmed_speed_limit, 13.0);

        inputs.speed_limit_confirmed = true;
        let output = arbitrator.update(&settings, &inputs);
        assert_eq!(output.target, 13.0);
        assert!(output.confirmation_consumed);
    }

    #[test]
    fn test_turn_speed_limits_target() {
        let mut arbitrator = CruiseTargetArbitrator::new();
        let settings = CruiseSettings {
            turn_speed: TurnSpeedSettings {
                enabled: true,
                curvature_check: false,
            },
            ..Default::default()
        };
        let inputs = CruiseInputs {
            v_ego: 20.0,
            v_ego_cluster: 20.0,
            v_cruise_kph: 108.0,
            engaged: true,
            map_turn_speed: Some(14.0),
            ..Default::default()
        };
        let output = arbitrator.update(&settings, &inputs);
        assert_eq!(output.target, 14.0);
        assert_eq!(output.turn_speed_target, 14.0);
        assert!(arbitrator.turn_speed_pending(108.0));
    }
}
