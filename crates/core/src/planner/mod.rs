//! Planning cycle orchestration
//!
//! [`Planner`] ties the acceleration, follow, cruise and mode stages
//! together once per cycle and returns one [`CycleResult`].

pub mod config;
pub mod inputs;
pub mod orchestrator;
pub mod result;

pub use config::PlannerConfig;
pub use inputs::{ControlsState, CycleInputs};
pub use orchestrator::Planner;
pub use result::CycleResult;
