//! General Settings
//!
//! Display units and lane detection.
//!
//! # Settings
//!
//! - `IsMetric` - Display and speed settings in km/h instead of mph
//! - `LaneDetection` - Estimate adjacent lane widths
//! - `MinimumLaneChangeSpeed` - Lane widths are only estimated above this
//!   speed (display units)

use super::error::ParameterError;
use super::load::{load_bool, load_int};
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::constants::{KPH_TO_MS, MPH_TO_MS};

// --- Defaults ---

const DEFAULT_IS_METRIC: bool = false;
const DEFAULT_LANE_DETECTION: bool = false;
const DEFAULT_MIN_LANE_CHANGE_SPEED: i32 = 20;

// --- Ranges ---

const MIN_LANE_CHANGE_SPEED: i32 = 0;
const MAX_LANE_CHANGE_SPEED: i32 = 100;

/// General settings loaded from the store
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneralParams {
    /// Speeds are entered and displayed in km/h
    pub is_metric: bool,
    /// Estimate adjacent lane widths
    pub lane_detection: bool,
    /// Minimum speed for lane width estimation (m/s)
    pub min_lane_change_speed: f32,
}

impl Default for GeneralParams {
    fn default() -> Self {
        Self {
            is_metric: DEFAULT_IS_METRIC,
            lane_detection: DEFAULT_LANE_DETECTION,
            min_lane_change_speed: DEFAULT_MIN_LANE_CHANGE_SPEED as f32 * MPH_TO_MS,
        }
    }
}

impl GeneralParams {
    /// Register general settings with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            "IsMetric",
            ParamValue::Bool(DEFAULT_IS_METRIC),
            ParamFlags::empty(),
        )?;
        store.register(
            "LaneDetection",
            ParamValue::Bool(DEFAULT_LANE_DETECTION),
            ParamFlags::empty(),
        )?;
        store.register(
            "MinimumLaneChangeSpeed",
            ParamValue::Int(DEFAULT_MIN_LANE_CHANGE_SPEED),
            ParamFlags::empty(),
        )?;
        Ok(())
    }

    /// Load general settings from the store
    pub fn from_store(store: &ParameterStore) -> Self {
        let is_metric = load_bool(store, "IsMetric", DEFAULT_IS_METRIC);
        let min_lane_change_speed = load_int(
            store,
            "MinimumLaneChangeSpeed",
            DEFAULT_MIN_LANE_CHANGE_SPEED,
            MIN_LANE_CHANGE_SPEED,
            MAX_LANE_CHANGE_SPEED,
        );

        Self {
            is_metric,
            lane_detection: load_bool(store, "LaneDetection", DEFAULT_LANE_DETECTION),
            min_lane_change_speed: min_lane_change_speed as f32 * display_to_ms(is_metric),
        }
    }
}

/// Factor from the display speed unit to m/s
pub fn display_to_ms(is_metric: bool) -> f32 {
    if is_metric {
        KPH_TO_MS
    } else {
        MPH_TO_MS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_params_defaults_match_store() {
        let mut store = ParameterStore::new();
        GeneralParams::register_defaults(&mut store).unwrap();
        let params = GeneralParams::from_store(&store);
        assert_eq!(params, GeneralParams::default());
        assert!((params.min_lane_change_speed - 8.9408).abs() < 1e-3);
    }

    #[test]
    fn test_metric_lane_change_speed() {
        let mut store = ParameterStore::new();
        GeneralParams::register_defaults(&mut store).unwrap();
        store.set("IsMetric", ParamValue::Bool(true)).unwrap();
        store
            .set("MinimumLaneChangeSpeed", ParamValue::Int(36))
            .unwrap();
        let params = GeneralParams::from_store(&store);
        assert!((params.min_lane_change_speed - 10.0).abs() < 1e-4);
    }
}
