//! Configuration error types
//!
//! Raised when tuning tables are loaded. A table that fails validation is
//! rejected before it can ever be interpolated.

use core::fmt;

/// Errors from tuning table construction and validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Table has no points
    EmptyTable,
    /// Breakpoint and value slices differ in length
    LengthMismatch {
        /// Number of breakpoints supplied
        breakpoints: usize,
        /// Number of values supplied
        values: usize,
    },
    /// Table exceeds the fixed point capacity
    TooManyPoints {
        /// Number of points supplied
        len: usize,
        /// Maximum supported
        max: usize,
    },
    /// Breakpoint at `index` is lower than its predecessor
    NonMonotonic {
        /// Offending breakpoint index
        index: usize,
    },
    /// Breakpoint or value at `index` is NaN or infinite
    NonFinite {
        /// Offending point index
        index: usize,
    },
    /// Minimum acceleration bound exceeds the maximum bound
    InvertedBounds {
        /// Ego speed (m/s) at which the bounds cross
        speed: f32,
        /// Minimum acceleration (m/s²)
        min: f32,
        /// Maximum acceleration (m/s²)
        max: f32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyTable => write!(f, "interpolation table is empty"),
            ConfigError::LengthMismatch {
                breakpoints,
                values,
            } => write!(
                f,
                "table has {} breakpoints but {} values",
                breakpoints, values
            ),
            ConfigError::TooManyPoints { len, max } => {
                write!(f, "table has {} points (max {})", len, max)
            }
            ConfigError::NonMonotonic { index } => {
                write!(f, "breakpoint {} is lower than its predecessor", index)
            }
            ConfigError::NonFinite { index } => {
                write!(f, "table point {} is not finite", index)
            }
            ConfigError::InvertedBounds { speed, min, max } => write!(
                f,
                "min accel {:.3} exceeds max accel {:.3} at {:.2} m/s",
                min, max, speed
            ),
        }
    }
}
