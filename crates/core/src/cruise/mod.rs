//! Cruise speed target
//!
//! Turn-speed limiting, the speed-limit confirmation gate and the
//! min-with-floor arbitration that merges them with the set speed.

mod arbitrator;
mod speed_limit;
mod turn_speed;

pub use arbitrator::{
    arbitrate, base_cruise, CruiseInputs, CruiseOutput, CruiseSettings, CruiseTargetArbitrator,
};
pub use speed_limit::{SpeedLimitGate, SpeedLimitOutcome};
pub use turn_speed::{
    TurnSpeedInputs, TurnSpeedLimiter, TurnSpeedSettings, CURVATURE_CHECK_THRESHOLD,
};
