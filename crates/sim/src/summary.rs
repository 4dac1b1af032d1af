use std::collections::BTreeMap;

use adaptive_long_core::planner::{CycleInputs, CycleResult};
use serde::Serialize;

/// Aggregated statistics of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub scenario: String,
    pub cycles: usize,
    pub sim_time_s: f32,
    /// Cycles with conditional mode active
    pub mode_active_cycles: usize,
    /// Inactive to active transitions
    pub mode_activations: usize,
    /// Active cycles per cause
    pub causes: BTreeMap<String, usize>,
    /// Cycles per selected acceleration profile
    pub profiles: BTreeMap<String, usize>,
    pub slower_lead_cycles: usize,
    /// Cycles marked invalid
    pub invalid_cycles: usize,
    /// Smallest true gap to the lead (m)
    pub min_gap: Option<f32>,
    pub collided: bool,
    pub max_speed: f32,
    pub final_speed: f32,
    /// Lowest arbitrated cruise target (m/s)
    pub min_cruise_target: Option<f32>,
    #[serde(skip)]
    last_active: bool,
}

impl RunSummary {
    pub fn new(scenario: &str) -> Self {
        Self {
            scenario: scenario.to_string(),
            ..Self::default()
        }
    }

    /// Account for one completed cycle.
    pub fn record(&mut self, inputs: &CycleInputs, result: &CycleResult, gap: Option<f32>) {
        let was_active = self.last_active;
        self.cycles += 1;

        if result.decision.active {
            self.mode_active_cycles += 1;
            if !was_active {
                self.mode_activations += 1;
            }
            *self
                .causes
                .entry(format!("{:?}", result.decision.cause))
                .or_default() += 1;
        }
        self.last_active = result.decision.active;

        *self
            .profiles
            .entry(format!("{:?}", result.profile()))
            .or_default() += 1;
        if result.follow.slower_lead {
            self.slower_lead_cycles += 1;
        }
        if !result.valid {
            self.invalid_cycles += 1;
        }

        if let Some(gap) = gap {
            self.min_gap = Some(self.min_gap.map_or(gap, |min| min.min(gap)));
            if gap <= 0.0 {
                self.collided = true;
            }
        }

        let speed = inputs.ego.speed();
        self.max_speed = self.max_speed.max(speed);
        self.final_speed = speed;
        let target = result.cruise_target();
        self.min_cruise_target = Some(self.min_cruise_target.map_or(target, |min| min.min(target)));
    }
}
