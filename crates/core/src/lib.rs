//! adaptive_long_core - Pure no_std longitudinal tuning logic
//!
//! Runs once per planning cycle and produces acceleration limits, jerk and
//! follow-time shaping, an arbitrated cruise target and the conditional
//! mode decision for a downstream MPC. Host-testable without any feature
//! flags.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **Pure no_std**: No std library dependencies
//! - **Single writer**: Cross-cycle state is owned by the stage that updates it
//!
//! # Modules
//!
//! - [`accel`]: Acceleration profile tables and limit selection
//! - [`follow`]: Personality tuning and follow shaping
//! - [`mode`]: Conditional mode decision and cause codes
//! - [`cruise`]: Turn-speed, speed-limit and cruise arbitration
//! - [`planner`]: Per-cycle orchestration
//! - [`filter`]: Moving average over boolean samples
//! - [`geometry`]: Road curvature and lane widths
//! - [`parameters`]: Settings store and typed settings blocks
//! - [`telemetry`]: Published plan message and sink trait
//! - [`table`]: Piecewise-linear interpolation tables
//! - [`vehicle`]: Ego, lead and controls input types

#![no_std]

pub mod accel;
pub mod constants;
pub mod cruise;
pub mod error;
pub mod filter;
pub mod follow;
pub mod geometry;
pub mod math;
pub mod mode;
pub mod parameters;
pub mod planner;
pub mod table;
pub mod telemetry;
pub mod vehicle;

pub use error::ConfigError;
pub use planner::{CycleInputs, CycleResult, Planner, PlannerConfig};
