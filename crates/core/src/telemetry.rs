//! Plan telemetry
//!
//! One [`PlanMessage`] per cycle, built from the [`CycleResult`]. Jerk
//! coefficients are published as MPC cost weights and the turn-speed
//! target in the driver's display unit.

use serde::{Deserialize, Serialize};

use crate::accel::ControlProfile;
use crate::constants::{A_CHANGE_COST, J_EGO_COST, MS_TO_KPH, MS_TO_MPH};
use crate::planner::CycleResult;

/// Published plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanMessage {
    /// Upstream inputs were valid
    pub valid: bool,
    pub acceleration_jerk: f32,
    pub acceleration_jerk_stock: f32,
    pub speed_jerk: f32,
    pub speed_jerk_stock: f32,
    pub t_follow: f32,
    /// Turn-speed target in km/h or mph
    pub adjusted_cruise: f32,
    pub conditional_active: bool,
    pub conditional_status: u8,
    pub lane_width_left: f32,
    pub lane_width_right: f32,
    pub max_acceleration: f32,
    pub min_acceleration: f32,
    pub profile: ControlProfile,
    /// Accepted speed limit (m/s)
    pub speed_limit: f32,
    /// Desired speed limit before confirmation (m/s)
    pub unconfirmed_speed_limit: f32,
    /// Arbitrated cruise target (m/s)
    pub v_cruise: f32,
}

impl PlanMessage {
    pub fn from_result(result: &CycleResult, is_metric: bool) -> Self {
        let display = if is_metric { MS_TO_KPH } else { MS_TO_MPH };
        let follow = &result.follow;

        Self {
            valid: result.valid,
            acceleration_jerk: A_CHANGE_COST * follow.jerk.acceleration,
            acceleration_jerk_stock: A_CHANGE_COST * follow.base_jerk.acceleration,
            speed_jerk: J_EGO_COST * follow.jerk.speed,
            speed_jerk_stock: J_EGO_COST * follow.base_jerk.speed,
            t_follow: follow.t_follow,
            adjusted_cruise: result.cruise.turn_speed_target * display,
            conditional_active: result.decision.active,
            conditional_status: result.decision.status_code(),
            lane_width_left: result.lane_width_left,
            lane_width_right: result.lane_width_right,
            max_acceleration: result.max_accel(),
            min_acceleration: result.min_accel(),
            profile: result.profile(),
            speed_limit: result.cruise.speed_limit_target,
            unconfirmed_speed_limit: result.cruise.unconfirmed_speed_limit,
            v_cruise: result.cruise.target,
        }
    }
}

/// Destination for plan messages
///
/// Fire-and-forget: at most one message per cycle, failures stay inside the
/// sink.
pub trait PlanSink {
    fn publish(&mut self, message: &PlanMessage);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{CycleInputs, Planner, PlannerConfig};
    use crate::vehicle::Gear;

    fn result(valid: bool) -> CycleResult {
        let mut inputs = CycleInputs::default();
        inputs.ego.velocity = 20.0;
        inputs.ego.gear = Gear::Drive;
        inputs.controls.enabled = true;
        inputs.controls.v_cruise_kph = 90.0;
        inputs.controls.inputs_valid = valid;
        Planner::new().update(&PlannerConfig::default(), &inputs)
    }

    #[test]
    fn test_jerk_scaled_by_costs() {
        let result = result(true);
        let message = PlanMessage::from_result(&result, true);
        assert_eq!(
            message.acceleration_jerk,
            A_CHANGE_COST * result.follow.jerk.acceleration
        );
        assert_eq!(message.speed_jerk_stock, J_EGO_COST * result.follow.base_jerk.speed);
        assert!(message.valid);
    }

    #[test]
    fn test_adjusted_cruise_display_units() {
        let result = result(true);
        let metric = PlanMessage::from_result(&result, true);
        assert!((metric.adjusted_cruise - 90.0).abs() < 1e-3);

        let imperial = PlanMessage::from_result(&result, false);
        assert!((imperial.adjusted_cruise - 90.0 / 1.609_344).abs() < 1e-2);
    }

    #[test]
    fn test_invalid_inputs_mark_message() {
        let message = PlanMessage::from_result(&result(false), false);
        assert!(!message.valid);
    }

    struct Counter(usize);

    impl PlanSink for Counter {
        fn publish(&mut self, _message: &PlanMessage) {
            self.0 += 1;
        }
    }

    #[test]
    fn test_sink_receives_message() {
        let mut sink = Counter(0);
        sink.publish(&PlanMessage::from_result(&result(true), true));
        assert_eq!(sink.0, 1);
    }
}
