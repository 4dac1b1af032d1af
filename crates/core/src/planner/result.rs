//! Per-cycle output bundle

use crate::accel::{AccelLimits, ControlProfile};
use crate::cruise::CruiseOutput;
use crate::follow::{FollowOutput, JerkFactors};
use crate::mode::ModeDecision;

/// Result of one planning cycle, handed to the MPC and telemetry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleResult {
    pub limits: AccelLimits,
    pub follow: FollowOutput,
    pub cruise: CruiseOutput,
    pub decision: ModeDecision,
    /// Road curvature (1/m)
    pub road_curvature: f32,
    /// Left / right lane widths (m), 0 when not estimated
    pub lane_width_left: f32,
    pub lane_width_right: f32,
    /// Upstream inputs were valid this cycle
    pub valid: bool,
}

impl CycleResult {
    pub fn min_accel(&self) -> f32 {
        self.limits.min()
    }

    pub fn max_accel(&self) -> f32 {
        self.limits.max()
    }

    pub fn profile(&self) -> ControlProfile {
        self.limits.profile()
    }

    /// Shaped jerk coefficients
    pub fn jerk(&self) -> JerkFactors {
        self.follow.jerk
    }

    /// Follow time (s)
    pub fn t_follow(&self) -> f32 {
        self.follow.t_follow
    }

    /// Arbitrated cruise target (m/s)
    pub fn cruise_target(&self) -> f32 {
        self.cruise.target
    }
}
