//! Follow dynamics
//!
//! Personality base values, the sticky lead tracker and the shaper that
//! adapts jerk costs and follow time to the lead's relative motion.

mod personality;
mod shaper;
mod tracker;

pub use personality::{JerkFactors, PersonalityTable, PersonalityTuning, TrafficModeTuning};
pub use shaper::{
    FollowDynamicsShaper, FollowInputs, FollowOutput, FollowSettings, T_FOLLOW_MAX, T_FOLLOW_MIN,
};
pub use tracker::LeadTracker;
