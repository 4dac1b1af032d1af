//! Acceleration limits
//!
//! Profile tables and the selector that turns ego speed, gear and toggles
//! into this cycle's `[min, max]` acceleration bounds.

mod selector;
mod tables;

pub use selector::{
    AccelInputs, AccelLimits, AccelSettings, AccelerationLimitSelector, AccelerationProfile,
    ControlProfile, DecelerationProfile,
};
pub use tables::{
    AccelTables, ProfileTables, ECO_MAX_VALS, ECO_MIN, PROFILE_MAX_BP, SPORT_MAX_VALS, SPORT_MIN,
    STOCK_MAX_BP, STOCK_MAX_VALS,
};
