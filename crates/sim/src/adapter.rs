use adaptive_long_core::planner::{CycleInputs, CycleResult};
use async_trait::async_trait;

use crate::error::SimError;
use crate::scenario::SettingValue;

/// Inputs for one planning cycle plus settings written since the last one.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub inputs: CycleInputs,
    /// Settings writes from the display side, applied before the cycle
    pub settings: Vec<(String, SettingValue)>,
}

/// Pluggable vehicle backend driven by the cycle runner.
///
/// Implementations must be `Send` so adapters can be boxed and moved
/// between tasks.
#[async_trait]
pub trait VehicleAdapter: Send {
    /// Human-readable name for this adapter instance.
    fn name(&self) -> &str;

    /// Produce the next input frame, `None` once the run is over.
    async fn sense(&mut self) -> Result<Option<Frame>, SimError>;

    /// Apply the planner output and advance one cycle.
    async fn actuate(&mut self, result: &CycleResult) -> Result<(), SimError>;

    /// Current simulation time in microseconds.
    fn sim_time_us(&self) -> u64;

    /// Current gap to the lead (m), if one is present.
    fn lead_gap(&self) -> Option<f32> {
        None
    }
}
