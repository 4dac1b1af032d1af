//! Signal smoothing filters
//!
//! Filters that stabilize per-cycle signals against single-frame noise
//! before they are allowed to trigger mode changes.

mod moving_average;

pub use moving_average::{MovingAverageFilter, DEFAULT_WINDOW, MAX_WINDOW};
