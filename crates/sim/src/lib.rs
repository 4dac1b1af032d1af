//! adaptive_long_sim - host harness for the longitudinal planner
//!
//! Loads scenario files, simulates ego and lead vehicles with simple
//! point-mass kinematics and runs the planner on a fixed tick.

pub mod adapter;
pub mod error;
pub mod kinematics;
pub mod runner;
pub mod scenario;
pub mod sink;
pub mod summary;
pub mod time;

pub use adapter::{Frame, VehicleAdapter};
pub use error::SimError;
pub use kinematics::LongitudinalSim;
pub use runner::CycleRunner;
pub use scenario::{Event, Scenario, SettingValue, TimedEvent};
pub use sink::{JsonLinesSink, MemorySink, NullSink};
pub use summary::RunSummary;
pub use time::TimeMode;

/// Load a scenario, run it to completion and return the summary.
pub async fn run_scenario(
    scenario: &Scenario,
    time_mode: TimeMode,
    sink: &mut dyn adaptive_long_core::telemetry::PlanSink,
) -> Result<RunSummary, SimError> {
    let mut runner = CycleRunner::from_scenario(scenario)?;
    runner.set_time_mode(time_mode);
    let mut vehicle = LongitudinalSim::from_scenario(scenario);
    runner.run(&mut vehicle, sink).await
}
