//! Longitudinal Tuning Settings
//!
//! Acceleration profiles, personality tuning and follow shaping.
//!
//! # Settings
//!
//! - `LongitudinalTune` - Master switch for profiles and aggressive acceleration
//! - `AccelerationProfile` - 0 stock, 1 eco, 2 sport, 3 custom
//! - `DecelerationProfile` - 0 stock, 1 eco, 2 sport, 3 custom
//! - `AggressiveAcceleration` - Follow a faster lead's acceleration
//! - `MapAcceleration` / `MapDeceleration` - Use eco / sport curves in that gear
//! - `AggressiveCeilingLow` / `AggressiveCeilingHigh` / `AggressiveCeilingSpeed`
//! - `SmoothBraking` - Softer, earlier braking behind slower leads
//! - `StoppingDistance` - Extra stop distance (m or ft)
//! - `SlowerLeadMargin` - Offset margin raising the slower-lead flag
//! - `JerkMin` / `JerkMax` - Jerk coefficient safety range
//! - `CustomPersonalities` - Use the per-personality values below
//! - `{Aggressive,Standard,Relaxed}Follow` - Follow time (s)
//! - `{Aggressive,Standard,Relaxed}Jerk{Acceleration,Speed}` - Jerk coefficients
//! - `TrafficFollow` / `TrafficJerkAcceleration` / `TrafficJerkSpeed` -
//!   Traffic mode values at standstill

use super::error::ParameterError;
use super::load::{load_bool, load_float, load_int};
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::accel::{AccelSettings, AccelerationProfile, DecelerationProfile};
use crate::constants::FOOT_TO_METER;
use crate::follow::{
    FollowSettings, JerkFactors, PersonalityTable, PersonalityTuning, TrafficModeTuning,
};

// --- Defaults ---

const DEFAULT_LONGITUDINAL_TUNE: bool = true;
const DEFAULT_CEILING_LOW: f32 = 4.0;
const DEFAULT_CEILING_HIGH: f32 = 2.0;
const DEFAULT_CEILING_SPEED: f32 = 20.0;
const DEFAULT_STOPPING_DISTANCE: i32 = 0;
const DEFAULT_SLOWER_LEAD_MARGIN: f32 = 1.0;
const DEFAULT_JERK_MIN: f32 = 1e-3;
const DEFAULT_JERK_MAX: f32 = 25.0;
const DEFAULT_TRAFFIC_FOLLOW: f32 = 0.5;
const DEFAULT_TRAFFIC_JERK_ACCELERATION: f32 = 0.5;
const DEFAULT_TRAFFIC_JERK_SPEED: f32 = 0.75;

// --- Ranges ---

const MIN_CEILING: f32 = 0.0;
const MAX_CEILING: f32 = 4.0;

const MIN_CEILING_SPEED: f32 = 0.0;
const MAX_CEILING_SPEED: f32 = 70.0;

const MIN_STOPPING_DISTANCE: i32 = 0;
const MAX_STOPPING_DISTANCE: i32 = 10;

const MIN_SLOWER_LEAD_MARGIN: f32 = 1.0;
const MAX_SLOWER_LEAD_MARGIN: f32 = 10.0;

const MIN_JERK: f32 = 1e-3;
const MAX_JERK: f32 = 25.0;

const MIN_FOLLOW: f32 = 0.5;
const MAX_FOLLOW: f32 = 5.0;

const MIN_PROFILE: i32 = 0;
const MAX_PROFILE: i32 = 3;

/// Setting names of one personality
struct PersonalityKeys {
    follow: &'static str,
    jerk_acceleration: &'static str,
    jerk_speed: &'static str,
}

const AGGRESSIVE_KEYS: PersonalityKeys = PersonalityKeys {
    follow: "AggressiveFollow",
    jerk_acceleration: "AggressiveJerkAcceleration",
    jerk_speed: "AggressiveJerkSpeed",
};
const STANDARD_KEYS: PersonalityKeys = PersonalityKeys {
    follow: "StandardFollow",
    jerk_acceleration: "StandardJerkAcceleration",
    jerk_speed: "StandardJerkSpeed",
};
const RELAXED_KEYS: PersonalityKeys = PersonalityKeys {
    follow: "RelaxedFollow",
    jerk_acceleration: "RelaxedJerkAcceleration",
    jerk_speed: "RelaxedJerkSpeed",
};

/// Longitudinal settings loaded from the store
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LongitudinalParams {
    pub accel: AccelSettings,
    /// Follow shaping; `conditional_mode` is filled in by the planner config
    pub follow: FollowSettings,
}

impl LongitudinalParams {
    /// Register longitudinal settings with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        let flags = ParamFlags::empty();

        store.register(
            "LongitudinalTune",
            ParamValue::Bool(DEFAULT_LONGITUDINAL_TUNE),
            flags,
        )?;
        store.register("AccelerationProfile", ParamValue::Int(0), flags)?;
        store.register("DecelerationProfile", ParamValue::Int(0), flags)?;
        store.register("AggressiveAcceleration", ParamValue::Bool(false), flags)?;
        store.register("MapAcceleration", ParamValue::Bool(false), flags)?;
        store.register("MapDeceleration", ParamValue::Bool(false), flags)?;
        store.register(
            "AggressiveCeilingLow",
            ParamValue::Float(DEFAULT_CEILING_LOW),
            flags,
        )?;
        store.register(
            "AggressiveCeilingHigh",
            ParamValue::Float(DEFAULT_CEILING_HIGH),
            flags,
        )?;
        store.register(
            "AggressiveCeilingSpeed",
            ParamValue::Float(DEFAULT_CEILING_SPEED),
            flags,
        )?;

        store.register("SmoothBraking", ParamValue::Bool(false), flags)?;
        store.register(
            "StoppingDistance",
            ParamValue::Int(DEFAULT_STOPPING_DISTANCE),
            flags,
        )?;
        store.register(
            "SlowerLeadMargin",
            ParamValue::Float(DEFAULT_SLOWER_LEAD_MARGIN),
            flags,
        )?;
        store.register("JerkMin", ParamValue::Float(DEFAULT_JERK_MIN), flags)?;
        store.register("JerkMax", ParamValue::Float(DEFAULT_JERK_MAX), flags)?;

        store.register("CustomPersonalities", ParamValue::Bool(false), flags)?;
        let stock = PersonalityTable::stock();
        for (keys, tuning) in [
            (&AGGRESSIVE_KEYS, stock.aggressive),
            (&STANDARD_KEYS, stock.standard),
            (&RELAXED_KEYS, stock.relaxed),
        ] {
            store.register(keys.follow, ParamValue::Float(tuning.t_follow), flags)?;
            store.register(
                keys.jerk_acceleration,
                ParamValue::Float(tuning.jerk.acceleration),
                flags,
            )?;
            store.register(keys.jerk_speed, ParamValue::Float(tuning.jerk.speed), flags)?;
        }

        store.register(
            "TrafficFollow",
            ParamValue::Float(DEFAULT_TRAFFIC_FOLLOW),
            flags,
        )?;
        store.register(
            "TrafficJerkAcceleration",
            ParamValue::Float(DEFAULT_TRAFFIC_JERK_ACCELERATION),
            flags,
        )?;
        store.register(
            "TrafficJerkSpeed",
            ParamValue::Float(DEFAULT_TRAFFIC_JERK_SPEED),
            flags,
        )?;

        Ok(())
    }

    /// Load longitudinal settings from the store
    ///
    /// `is_metric` selects the unit of `StoppingDistance` (m or ft).
    pub fn from_store(store: &ParameterStore, is_metric: bool) -> Self {
        let tune = load_bool(store, "LongitudinalTune", DEFAULT_LONGITUDINAL_TUNE);
        let profile = |name: &str| {
            if tune {
                load_int(store, name, 0, MIN_PROFILE, MAX_PROFILE)
            } else {
                0
            }
        };

        let accel = AccelSettings {
            acceleration_profile: AccelerationProfile::from_i32(profile("AccelerationProfile")),
            deceleration_profile: DecelerationProfile::from_i32(profile("DecelerationProfile")),
            aggressive_acceleration: tune && load_bool(store, "AggressiveAcceleration", false),
            map_acceleration: load_bool(store, "MapAcceleration", false),
            map_deceleration: load_bool(store, "MapDeceleration", false),
            aggressive_ceiling_low: load_float(
                store,
                "AggressiveCeilingLow",
                DEFAULT_CEILING_LOW,
                MIN_CEILING,
                MAX_CEILING,
            ),
            aggressive_ceiling_high: load_float(
                store,
                "AggressiveCeilingHigh",
                DEFAULT_CEILING_HIGH,
                MIN_CEILING,
                MAX_CEILING,
            ),
            aggressive_ceiling_speed: load_float(
                store,
                "AggressiveCeilingSpeed",
                DEFAULT_CEILING_SPEED,
                MIN_CEILING_SPEED,
                MAX_CEILING_SPEED,
            ),
        };

        let stopping_distance = load_int(
            store,
            "StoppingDistance",
            DEFAULT_STOPPING_DISTANCE,
            MIN_STOPPING_DISTANCE,
            MAX_STOPPING_DISTANCE,
        ) as f32;
        let increased_stopping_distance = if is_metric {
            stopping_distance
        } else {
            stopping_distance * FOOT_TO_METER
        };

        let jerk_min = load_float(store, "JerkMin", DEFAULT_JERK_MIN, MIN_JERK, MAX_JERK);
        let jerk_max = load_float(store, "JerkMax", DEFAULT_JERK_MAX, jerk_min, MAX_JERK);

        let personalities = if load_bool(store, "CustomPersonalities", false) {
            let stock = PersonalityTable::stock();
            PersonalityTable {
                aggressive: load_personality(store, &AGGRESSIVE_KEYS, stock.aggressive),
                standard: load_personality(store, &STANDARD_KEYS, stock.standard),
                relaxed: load_personality(store, &RELAXED_KEYS, stock.relaxed),
            }
        } else {
            PersonalityTable::stock()
        };

        // Traffic mode runs from its own standstill values up to the
        // aggressive values at city speed
        let aggressive = personalities.aggressive;
        let traffic = TrafficModeTuning {
            jerk_acceleration: [
                load_float(
                    store,
                    "TrafficJerkAcceleration",
                    DEFAULT_TRAFFIC_JERK_ACCELERATION,
                    MIN_JERK,
                    MAX_JERK,
                ),
                aggressive.jerk.acceleration,
            ],
            jerk_speed: [
                load_float(
                    store,
                    "TrafficJerkSpeed",
                    DEFAULT_TRAFFIC_JERK_SPEED,
                    MIN_JERK,
                    MAX_JERK,
                ),
                aggressive.jerk.speed,
            ],
            t_follow: [
                load_float(
                    store,
                    "TrafficFollow",
                    DEFAULT_TRAFFIC_FOLLOW,
                    MIN_FOLLOW,
                    MAX_FOLLOW,
                ),
                aggressive.t_follow,
            ],
        };

        let follow = FollowSettings {
            personalities,
            traffic,
            increased_stopping_distance,
            aggressive_acceleration: accel.aggressive_acceleration,
            conditional_mode: false,
            smoother_braking: load_bool(store, "SmoothBraking", false),
            slower_lead_margin: load_float(
                store,
                "SlowerLeadMargin",
                DEFAULT_SLOWER_LEAD_MARGIN,
                MIN_SLOWER_LEAD_MARGIN,
                MAX_SLOWER_LEAD_MARGIN,
            ),
            jerk_min,
            jerk_max,
        };

        Self { accel, follow }
    }
}

fn load_personality(
    store: &ParameterStore,
    keys: &PersonalityKeys,
    stock: PersonalityTuning,
) -> PersonalityTuning {
    PersonalityTuning {
        jerk: JerkFactors::new(
            load_float(
                store,
                keys.jerk_acceleration,
                stock.jerk.acceleration,
                MIN_JERK,
                MAX_JERK,
            ),
            load_float(store, keys.jerk_speed, stock.jerk.speed, MIN_JERK, MAX_JERK),
        ),
        t_follow: load_float(store, keys.follow, stock.t_follow, MIN_FOLLOW, MAX_FOLLOW),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registered() -> ParameterStore {
        let mut store = ParameterStore::new();
        LongitudinalParams::register_defaults(&mut store).unwrap();
        store
    }

    #[test]
    fn test_defaults_match_store() {
        let params = LongitudinalParams::from_store(&registered(), false);
        assert_eq!(params, LongitudinalParams::default());
    }

    #[test]
    fn test_profiles_gated_by_longitudinal_tune() {
        let mut store = registered();
        store.set("AccelerationProfile", ParamValue::Int(2)).unwrap();
        store
            .set("AggressiveAcceleration", ParamValue::Bool(true))
            .unwrap();
        let params = LongitudinalParams::from_store(&store, false);
        assert_eq!(params.accel.acceleration_profile, AccelerationProfile::Sport);
        assert!(params.follow.aggressive_acceleration);

        store
            .set("LongitudinalTune", ParamValue::Bool(false))
            .unwrap();
        let params = LongitudinalParams::from_store(&store, false);
        assert_eq!(params.accel.acceleration_profile, AccelerationProfile::Stock);
        assert!(!params.accel.aggressive_acceleration);
    }

    #[test]
    fn test_profile_out_of_range_clamped() {
        let mut store = registered();
        store.set("DecelerationProfile", ParamValue::Int(9)).unwrap();
        let params = LongitudinalParams::from_store(&store, false);
        assert_eq!(params.accel.deceleration_profile, DecelerationProfile::Custom);
    }

    #[test]
    fn test_custom_personalities() {
        let mut store = registered();
        store.set("StandardFollow", ParamValue::Float(2.0)).unwrap();
        let params = LongitudinalParams::from_store(&store, false);
        assert_eq!(params.follow.personalities.standard.t_follow, 1.45);

        store
            .set("CustomPersonalities", ParamValue::Bool(true))
            .unwrap();
        let params = LongitudinalParams::from_store(&store, false);
        assert_eq!(params.follow.personalities.standard.t_follow, 2.0);
    }

    #[test]
    fn test_stopping_distance_units() {
        let mut store = registered();
        store.set("StoppingDistance", ParamValue::Int(10)).unwrap();
        let imperial = LongitudinalParams::from_store(&store, false);
        assert!((imperial.follow.increased_stopping_distance - 3.048).abs() < 1e-5);
        let metric = LongitudinalParams::from_store(&store, true);
        assert_eq!(metric.follow.increased_stopping_distance, 10.0);
    }

    #[test]
    fn test_jerk_max_never_below_min() {
        let mut store = registered();
        store.set("JerkMin", ParamValue::Float(2.0)).unwrap();
        store.set("JerkMax", ParamValue::Float(1.0)).unwrap();
        let params = LongitudinalParams::from_store(&store, false);
        assert_eq!(params.follow.jerk_min, 2.0);
        assert_eq!(params.follow.jerk_max, 2.0);
    }
}
