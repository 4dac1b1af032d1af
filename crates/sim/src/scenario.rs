//! Scenario files
//!
//! A scenario is a JSON document describing the initial ego and lead state,
//! the road ahead, settings overrides and a list of timed events.
//!
//! ```json
//! {
//!   "name": "slower_lead",
//!   "duration_s": 30.0,
//!   "settings": { "ConditionalExperimental": true, "CESlowerLead": true },
//!   "ego": { "velocity": 25.0 },
//!   "controls": { "enabled": true, "v_cruise_kph": 100.0 },
//!   "lead": { "distance": 60.0, "velocity": 15.0 },
//!   "events": [{ "at_s": 10.0, "type": "lead_speed", "velocity": 5.0 }]
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use adaptive_long_core::accel::{AccelTables, ProfileTables};
use adaptive_long_core::parameters::{register_all, ParamValue, ParameterError, ParameterStore};
use adaptive_long_core::planner::ControlsState;
use adaptive_long_core::table::InterpTable;
use adaptive_long_core::vehicle::{Gear, Personality};
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Settings override value; converted to the registered type on apply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl SettingValue {
    fn to_param(self, registered: &ParamValue) -> Option<ParamValue> {
        match (registered, self) {
            (ParamValue::Bool(_), SettingValue::Bool(b)) => Some(ParamValue::Bool(b)),
            (ParamValue::Int(_), SettingValue::Int(i)) => i32::try_from(i).ok().map(ParamValue::Int),
            (ParamValue::Int(_), SettingValue::Float(f)) if f.fract() == 0.0 => {
                Some(ParamValue::Int(f as i32))
            }
            (ParamValue::Float(_), SettingValue::Int(i)) => Some(ParamValue::Float(i as f32)),
            (ParamValue::Float(_), SettingValue::Float(f)) => Some(ParamValue::Float(f as f32)),
            _ => None,
        }
    }
}

/// Write an override into the store, converting it to the registered type.
pub fn apply_setting(
    store: &mut ParameterStore,
    name: &str,
    value: SettingValue,
) -> Result<(), SimError> {
    let setting_error = |error| SimError::Setting {
        name: name.to_string(),
        error,
    };
    let registered = *store
        .get(name)
        .ok_or_else(|| setting_error(ParameterError::InvalidConfig))?;
    let value = value
        .to_param(&registered)
        .ok_or_else(|| setting_error(ParameterError::TypeMismatch))?;
    store.set(name, value).map_err(setting_error)
}

/// Breakpoints and values of one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    pub breakpoints: Vec<f32>,
    pub values: Vec<f32>,
}

impl TableSpec {
    fn build(&self) -> Result<InterpTable, SimError> {
        Ok(InterpTable::new(&self.breakpoints, &self.values)?)
    }
}

/// Custom acceleration profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomTables {
    pub max: TableSpec,
    pub min: TableSpec,
}

/// Initial ego state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EgoSetup {
    /// Initial speed (m/s)
    pub velocity: f32,
    pub gear: Gear,
    /// Cluster speed reads this much above the true speed (fraction)
    pub cluster_offset: f32,
}

impl Default for EgoSetup {
    fn default() -> Self {
        Self {
            velocity: 0.0,
            gear: Gear::Drive,
            cluster_offset: 0.0,
        }
    }
}

/// Initial lead vehicle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeadSetup {
    /// Gap to the ego vehicle (m)
    pub distance: f32,
    /// Speed (m/s)
    pub velocity: f32,
}

/// Constant-curvature stretch of road
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveSegment {
    /// Start position along the road (m)
    pub start_m: f32,
    /// End position along the road (m)
    pub end_m: f32,
    /// Curvature (1/m)
    pub curvature: f32,
}

/// Scripted change at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Lead moves towards a new speed at `accel` (m/s²)
    LeadSpeed {
        velocity: f32,
        #[serde(default = "default_lead_accel")]
        accel: f32,
    },
    /// Lead leaves the lane
    LeadLost,
    /// A new lead appears
    LeadCutIn { distance: f32, velocity: f32 },
    /// Driver changes the set speed (km/h)
    SetSpeed { kph: f32 },
    Engage { enabled: bool },
    Navigation {
        #[serde(default)]
        intersection: bool,
        #[serde(default)]
        turn: bool,
    },
    /// Map turn speed (m/s); `null` clears it
    MapTurnSpeed { speed: Option<f32> },
    /// Desired speed limit (m/s)
    SpeedLimit { speed: f32 },
    TurnSignal { on: bool },
    Personality { personality: Personality },
    TrafficMode { enabled: bool },
    /// Settings write, e.g. the driver confirming a speed limit
    Setting { name: String, value: SettingValue },
}

fn default_lead_accel() -> f32 {
    1.5
}

/// Event with its trigger time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    /// Simulation time (s)
    pub at_s: f32,
    #[serde(flatten)]
    pub event: Event,
}

/// A complete scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default = "default_duration")]
    pub duration_s: f32,
    /// Planning period (ms)
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// RNG seed for sensor noise; `None` seeds from entropy
    #[serde(default)]
    pub seed: Option<u64>,
    /// Lead distance noise amplitude (m)
    #[serde(default)]
    pub distance_noise_m: f32,
    #[serde(default)]
    pub settings: BTreeMap<String, SettingValue>,
    #[serde(default)]
    pub custom_tables: Option<CustomTables>,
    #[serde(default)]
    pub ego: EgoSetup,
    #[serde(default)]
    pub controls: ControlsState,
    #[serde(default)]
    pub lead: Option<LeadSetup>,
    #[serde(default)]
    pub road: Vec<CurveSegment>,
    /// Lane width (m); lane lines are generated when set
    #[serde(default)]
    pub lane_width: Option<f32>,
    #[serde(default)]
    pub events: Vec<TimedEvent>,
}

fn default_duration() -> f32 {
    30.0
}

fn default_tick_ms() -> u64 {
    50
}

impl Scenario {
    /// Parse and validate a scenario; events are sorted by time.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let mut scenario: Scenario = serde_json::from_str(json)?;
        scenario.validate()?;
        scenario
            .events
            .sort_by(|a, b| a.at_s.total_cmp(&b.at_s));
        Ok(scenario)
    }

    /// Load a scenario file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Number of planning cycles in the scenario
    pub fn cycles(&self) -> usize {
        let total_ms = f64::from(self.duration_s) * 1000.0;
        (total_ms / self.tick_ms as f64).ceil() as usize
    }

    /// Planning period (s)
    pub fn dt(&self) -> f32 {
        self.tick_ms as f32 / 1000.0
    }

    /// Settings store with all defaults plus the scenario overrides
    pub fn build_store(&self) -> Result<ParameterStore, SimError> {
        let mut store = ParameterStore::new();
        register_all(&mut store).map_err(|error| SimError::Setting {
            name: "<defaults>".to_string(),
            error,
        })?;
        for (name, value) in &self.settings {
            apply_setting(&mut store, name, *value)?;
        }
        Ok(store)
    }

    /// Acceleration tables including the custom profile, if any
    pub fn accel_tables(&self) -> Result<AccelTables, SimError> {
        let tables = AccelTables::default();
        match &self.custom_tables {
            Some(custom) => {
                let profile = ProfileTables::new(custom.max.build()?, custom.min.build()?)?;
                Ok(tables.with_custom(profile))
            }
            None => Ok(tables),
        }
    }

    fn validate(&self) -> Result<(), SimError> {
        if self.tick_ms == 0 {
            return Err(SimError::Scenario("tick_ms must be positive".into()));
        }
        if !(self.duration_s.is_finite() && self.duration_s > 0.0) {
            return Err(SimError::Scenario("duration_s must be positive".into()));
        }
        if !self.ego.velocity.is_finite() || self.ego.velocity < 0.0 {
            return Err(SimError::Scenario("ego velocity must be >= 0".into()));
        }
        if let Some(lead) = &self.lead {
            if !(lead.distance.is_finite() && lead.distance > 0.0) {
                return Err(SimError::Scenario("lead distance must be positive".into()));
            }
        }
        for segment in &self.road {
            if !(segment.start_m.is_finite() && segment.end_m.is_finite())
                || segment.end_m <= segment.start_m
            {
                return Err(SimError::Scenario(format!(
                    "road segment {}..{} is empty",
                    segment.start_m, segment.end_m
                )));
            }
        }
        if let Some(event) = self.events.iter().find(|e| !e.at_s.is_finite()) {
            return Err(SimError::Scenario(format!(
                "event {:?} has no valid time",
                event.event
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{ "name": "minimal" }"#;

    #[test]
    fn test_minimal_scenario_defaults() {
        let scenario = Scenario::from_json(MINIMAL).unwrap();
        assert_eq!(scenario.tick_ms, 50);
        assert_eq!(scenario.cycles(), 600);
        assert_eq!(scenario.ego.gear, Gear::Drive);
        assert!(scenario.lead.is_none());
        assert!(!scenario.controls.enabled);
    }

    #[test]
    fn test_events_sorted() {
        let scenario = Scenario::from_json(
            r#"{
                "name": "events",
                "events": [
                    { "at_s": 5.0, "type": "lead_lost" },
                    { "at_s": 1.0, "type": "set_speed", "kph": 80.0 }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(scenario.events[0].event, Event::SetSpeed { kph: 80.0 });
        assert_eq!(scenario.events[1].event, Event::LeadLost);
    }

    #[test]
    fn test_settings_converted_to_registered_type() {
        let scenario = Scenario::from_json(
            r#"{
                "name": "settings",
                "settings": { "CESpeed": 35, "SlowerLeadMargin": 2, "CECurves": true }
            }"#,
        )
        .unwrap();
        let store = scenario.build_store().unwrap();
        assert_eq!(store.get_int("CESpeed"), Ok(35));
        assert_eq!(store.get_float("SlowerLeadMargin"), Ok(2.0));
        assert_eq!(store.get_bool("CECurves"), Ok(true));
    }

    #[test]
    fn test_unknown_setting_rejected() {
        let scenario =
            Scenario::from_json(r#"{ "name": "bad", "settings": { "NoSuchKey": 1 } }"#).unwrap();
        assert!(matches!(
            scenario.build_store(),
            Err(SimError::Setting { .. })
        ));
    }

    #[test]
    fn test_read_only_setting_rejected() {
        let scenario =
            Scenario::from_json(r#"{ "name": "bad", "settings": { "CEStatus": 3 } }"#).unwrap();
        assert!(matches!(
            scenario.build_store(),
            Err(SimError::Setting {
                error: ParameterError::ReadOnly,
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_custom_table() {
        let scenario = Scenario::from_json(
            r#"{
                "name": "tables",
                "custom_tables": {
                    "max": { "breakpoints": [0.0, 10.0, 5.0], "values": [2.0, 1.5, 1.0] },
                    "min": { "breakpoints": [0.0], "values": [-1.0] }
                }
            }"#,
        )
        .unwrap();
        assert!(matches!(scenario.accel_tables(), Err(SimError::Config(_))));
    }

    #[test]
    fn test_zero_tick_rejected() {
        assert!(matches!(
            Scenario::from_json(r#"{ "name": "bad", "tick_ms": 0 }"#),
            Err(SimError::Scenario(_))
        ));
    }
}
