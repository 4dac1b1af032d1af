//! Conditional Mode Settings
//!
//! # Settings
//!
//! - `ConditionalExperimental` - Enable conditional mode
//! - `CESpeed` / `CESpeedLead` - Low-speed limits without / with a lead
//!   (display units, 0 disables)
//! - `CENavigation` / `CENavigationLead` - Upcoming intersections and turns
//! - `CECurves` / `CECurvesLead` - Curves ahead
//! - `CESlowerLead` - Slower or stopped leads
//! - `CEStoppedLeadSpeed` - Lead speed (m/s) treated as stopped
//! - `CESignal` / `CESignalSpeed` - Turn signal below a speed (m/s)
//! - `CECurveAccel` / `CECurveSustainAccel` - Lateral acceleration (m/s²)
//!   triggering / sustaining curve detection
//! - `CEWindow` / `CETrigger` - Smoothing window (samples) and trigger fraction

use super::error::ParameterError;
use super::general::display_to_ms;
use super::load::{load_bool, load_float, load_int};
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::filter::{DEFAULT_WINDOW, MAX_WINDOW};
use crate::mode::ModeSettings;

// --- Defaults ---

const DEFAULT_SPEED_LIMIT: i32 = 0;
const DEFAULT_STOPPED_LEAD_SPEED: f32 = 1.0;
const DEFAULT_SIGNAL_SPEED: f32 = 24.6;
const DEFAULT_CURVE_ACCEL: f32 = 1.0;
const DEFAULT_CURVE_SUSTAIN_ACCEL: f32 = 0.9;
const DEFAULT_TRIGGER: f32 = 0.6;

// --- Ranges ---

const MIN_SPEED_LIMIT: i32 = 0;
const MAX_SPEED_LIMIT: i32 = 150;

const MIN_SPEED: f32 = 0.0;
const MAX_SPEED: f32 = 70.0;

const MIN_LAT_ACCEL: f32 = 0.1;
const MAX_LAT_ACCEL: f32 = 5.0;

const MIN_TRIGGER: f32 = 0.05;
const MAX_TRIGGER: f32 = 1.0;

/// Conditional mode settings loaded from the store
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConditionalParams {
    pub mode: ModeSettings,
}

impl ConditionalParams {
    /// Register conditional mode settings with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        let flags = ParamFlags::empty();

        for name in [
            "ConditionalExperimental",
            "CENavigation",
            "CENavigationLead",
            "CECurves",
            "CECurvesLead",
            "CESlowerLead",
            "CESignal",
        ] {
            store.register(name, ParamValue::Bool(false), flags)?;
        }
        store.register("CESpeed", ParamValue::Int(DEFAULT_SPEED_LIMIT), flags)?;
        store.register("CESpeedLead", ParamValue::Int(DEFAULT_SPEED_LIMIT), flags)?;
        store.register(
            "CEStoppedLeadSpeed",
            ParamValue::Float(DEFAULT_STOPPED_LEAD_SPEED),
            flags,
        )?;
        store.register(
            "CESignalSpeed",
            ParamValue::Float(DEFAULT_SIGNAL_SPEED),
            flags,
        )?;
        store.register(
            "CECurveAccel",
            ParamValue::Float(DEFAULT_CURVE_ACCEL),
            flags,
        )?;
        store.register(
            "CECurveSustainAccel",
            ParamValue::Float(DEFAULT_CURVE_SUSTAIN_ACCEL),
            flags,
        )?;
        store.register("CEWindow", ParamValue::Int(DEFAULT_WINDOW as i32), flags)?;
        store.register("CETrigger", ParamValue::Float(DEFAULT_TRIGGER), flags)?;

        Ok(())
    }

    /// Load conditional mode settings from the store
    ///
    /// `is_metric` selects the unit of `CESpeed` / `CESpeedLead`.
    pub fn from_store(store: &ParameterStore, is_metric: bool) -> Self {
        let to_ms = display_to_ms(is_metric);
        let limit = |name: &str| {
            load_int(
                store,
                name,
                DEFAULT_SPEED_LIMIT,
                MIN_SPEED_LIMIT,
                MAX_SPEED_LIMIT,
            ) as f32
                * to_ms
        };

        let mode = ModeSettings {
            enabled: load_bool(store, "ConditionalExperimental", false),
            limit_lead: limit("CESpeedLead"),
            limit_no_lead: limit("CESpeed"),
            navigation: load_bool(store, "CENavigation", false),
            navigation_lead: load_bool(store, "CENavigationLead", false),
            curves: load_bool(store, "CECurves", false),
            curves_lead: load_bool(store, "CECurvesLead", false),
            slower_lead: load_bool(store, "CESlowerLead", false),
            stopped_lead_speed: load_float(
                store,
                "CEStoppedLeadSpeed",
                DEFAULT_STOPPED_LEAD_SPEED,
                MIN_SPEED,
                MAX_SPEED,
            ),
            signal: load_bool(store, "CESignal", false),
            signal_speed: load_float(
                store,
                "CESignalSpeed",
                DEFAULT_SIGNAL_SPEED,
                MIN_SPEED,
                MAX_SPEED,
            ),
            curve_trigger_lat_accel: load_float(
                store,
                "CECurveAccel",
                DEFAULT_CURVE_ACCEL,
                MIN_LAT_ACCEL,
                MAX_LAT_ACCEL,
            ),
            curve_sustain_lat_accel: load_float(
                store,
                "CECurveSustainAccel",
                DEFAULT_CURVE_SUSTAIN_ACCEL,
                MIN_LAT_ACCEL,
                MAX_LAT_ACCEL,
            ),
            window: load_int(
                store,
                "CEWindow",
                DEFAULT_WINDOW as i32,
                1,
                MAX_WINDOW as i32,
            ) as usize,
            trigger_fraction: load_float(
                store,
                "CETrigger",
                DEFAULT_TRIGGER,
                MIN_TRIGGER,
                MAX_TRIGGER,
            ),
        };

        Self { mode }
    }
}
