//! Shared physical and tuning constants
//!
//! Units are SI (m, m/s, m/s²) unless the name says otherwise.

/// km/h → m/s
pub const KPH_TO_MS: f32 = 1.0 / 3.6;

/// m/s → km/h
pub const MS_TO_KPH: f32 = 3.6;

/// m/s → mph
pub const MS_TO_MPH: f32 = 2.236_936;

/// mph → m/s
pub const MPH_TO_MS: f32 = 1.0 / MS_TO_MPH;

/// ft → m
pub const FOOT_TO_METER: f32 = 0.3048;

/// Set speed (km/h) reported by the controls layer while cruise is not set
pub const V_CRUISE_UNSET: f32 = 255.0;

/// Speed (m/s) at or below which a speed-limiting target counts as inactive.
///
/// Also the minimum speed at which lead tracking is refreshed.
pub const CRUISING_SPEED: f32 = 5.0;

/// Speed (m/s) separating city driving from highway driving
pub const CITY_SPEED_LIMIT: f32 = 25.0;

/// Comfortable braking deceleration magnitude (m/s²)
pub const COMFORT_BRAKE: f32 = 2.5;

/// Distance (m) kept to a stopped lead
pub const STOP_DISTANCE: f32 = 6.0;

/// Widest acceleration the downstream controller accepts (m/s²)
pub const ACCEL_MAX: f32 = 2.0;

/// Widest deceleration the downstream controller accepts (m/s²)
pub const ACCEL_MIN: f32 = -3.5;

/// Stock cruise deceleration bound (m/s²)
pub const A_CRUISE_MIN: f32 = -1.2;

/// MPC cost weight applied to the acceleration-change jerk coefficient
pub const A_CHANGE_COST: f32 = 200.0;

/// MPC cost weight applied to the ego speed jerk coefficient
pub const J_EGO_COST: f32 = 5.0;
