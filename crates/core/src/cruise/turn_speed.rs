//! Map turn-speed limiting

use crate::constants::CRUISING_SPEED;
use crate::math::clip;

/// Road curvature (1/m) below which the curvature check ignores map turns
pub const CURVATURE_CHECK_THRESHOLD: f32 = 1.0;

/// Turn-speed limiter settings
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TurnSpeedSettings {
    pub enabled: bool,
    /// Only start limiting once the road itself curves
    pub curvature_check: bool,
}

/// Per-cycle inputs
#[derive(Debug, Clone, Copy, Default)]
pub struct TurnSpeedInputs {
    pub engaged: bool,
    /// Ego speed (m/s)
    pub v_ego: f32,
    /// Set speed (m/s)
    pub v_cruise: f32,
    /// Cruise is set
    pub cruise_set: bool,
    /// Turn speed from map data (m/s), if any
    pub map_turn_speed: Option<f32>,
    /// Road curvature (1/m)
    pub road_curvature: f32,
}

/// Curvature-limited speed target carried across cycles
#[derive(Debug, Clone, Copy, Default)]
pub struct TurnSpeedLimiter {
    target: f32,
}

impl TurnSpeedLimiter {
    pub const fn new() -> Self {
        Self { target: 0.0 }
    }

    /// Compute this cycle's target (m/s).
    pub fn update(&mut self, settings: &TurnSpeedSettings, inputs: &TurnSpeedInputs) -> f32 {
        let v_cruise = inputs.v_cruise;

        self.target = if settings.enabled && inputs.engaged && inputs.v_ego > CRUISING_SPEED {
            let was_limiting = self.is_limiting(v_cruise);
            let map_speed = match inputs.map_turn_speed {
                Some(speed) if speed.is_finite() => speed,
                _ => v_cruise,
            };
            let target = clip(map_speed, CRUISING_SPEED, v_cruise);

            if settings.curvature_check
                && inputs.road_curvature < CURVATURE_CHECK_THRESHOLD
                && !was_limiting
            {
                v_cruise
            } else if target == CRUISING_SPEED {
                v_cruise
            } else {
                target
            }
        } else if inputs.cruise_set {
            v_cruise
        } else {
            0.0
        };

        self.target
    }

    /// Current target (m/s)
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Check if an active target is below the set speed
    pub fn is_limiting(&self, v_cruise: f32) -> bool {
        self.target > 0.0 && self.target < v_cruise
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_inputs(map_turn_speed: f32) -> TurnSpeedInputs {
        TurnSpeedInputs {
            engaged: true,
            v_ego: 20.0,
            v_cruise: 25.0,
            cruise_set: true,
            map_turn_speed: Some(map_turn_speed),
            road_curvature: 0.0,
        }
    }

    fn enabled() -> TurnSpeedSettings {
        TurnSpeedSettings {
            enabled: true,
            curvature_check: false,
        }
    }

    #[test]
    fn test_disabled_follows_cruise() {
        let mut limiter = TurnSpeedLimiter::new();
        let target = limiter.update(&TurnSpeedSettings::default(), &active_inputs(10.0));
        assert_eq!(target, 25.0);
    }

    #[test]
    fn test_unset_cruise_is_zero() {
        let mut limiter = TurnSpeedLimiter::new();
        let mut inputs = active_inputs(10.0);
        inputs.cruise_set = false;
        assert_eq!(limiter.update(&TurnSpeedSettings::default(), &inputs), 0.0);
    }

    #[test]
    fn test_clamps_map_speed() {
        let mut limiter = TurnSpeedLimiter::new();
        assert_eq!(limiter.update(&enabled(), &active_inputs(12.0)), 12.0);
        assert_eq!(limiter.update(&enabled(), &active_inputs(40.0)), 25.0);
        // Clamped to the floor means inactive
        assert_eq!(limiter.update(&enabled(), &active_inputs(2.0)), 25.0);
    }

    #[test]
    fn test_inactive_at_low_speed() {
        let mut limiter = TurnSpeedLimiter::new();
        let mut inputs = active_inputs(12.0);
        inputs.v_ego = CRUISING_SPEED;
        assert_eq!(limiter.update(&enabled(), &inputs), 25.0);
    }

    #[test]
    fn test_curvature_check_waits_for_curve() {
        let mut limiter = TurnSpeedLimiter::new();
        let settings = TurnSpeedSettings {
            enabled: true,
            curvature_check: true,
        };
        let mut inputs = active_inputs(12.0);

        // Start from an inactive target
        limiter.update(&TurnSpeedSettings::default(), &inputs);
        assert_eq!(limiter.update(&settings, &inputs), 25.0);

        inputs.road_curvature = 1.5;
        assert_eq!(limiter.update(&settings, &inputs), 12.0);

        // Once limiting, flat curvature no longer releases it
        inputs.road_curvature = 0.0;
        assert_eq!(limiter.update(&settings, &inputs), 12.0);
        assert!(limiter.is_limiting(25.0));
    }

    #[test]
    fn test_missing_map_speed_is_inactive() {
        let mut limiter = TurnSpeedLimiter::new();
        let mut inputs = active_inputs(12.0);
        inputs.map_turn_speed = None;
        assert_eq!(limiter.update(&enabled(), &inputs), 25.0);
        assert!(!limiter.is_limiting(25.0));
    }
}
