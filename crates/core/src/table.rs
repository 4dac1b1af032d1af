//! Piecewise-linear lookup tables
//!
//! Tuning curves are authored as (breakpoint, value) pairs with
//! non-decreasing breakpoints. Evaluation clamps to the nearest endpoint
//! outside the table's domain.

use heapless::Vec;

use crate::error::ConfigError;

/// Maximum number of points per table
pub const MAX_TABLE_POINTS: usize = 12;

/// Validated piecewise-linear table
#[derive(Debug, Clone, PartialEq)]
pub struct InterpTable {
    breakpoints: Vec<f32, MAX_TABLE_POINTS>,
    values: Vec<f32, MAX_TABLE_POINTS>,
}

impl InterpTable {
    /// Build a table, rejecting malformed input.
    ///
    /// # Errors
    ///
    /// - `EmptyTable` if no points are given
    /// - `LengthMismatch` if the slices differ in length
    /// - `TooManyPoints` if the table exceeds `MAX_TABLE_POINTS`
    /// - `NonFinite` if any point is NaN or infinite
    /// - `NonMonotonic` if a breakpoint is lower than its predecessor
    pub fn new(breakpoints: &[f32], values: &[f32]) -> Result<Self, ConfigError> {
        if breakpoints.len() != values.len() {
            return Err(ConfigError::LengthMismatch {
                breakpoints: breakpoints.len(),
                values: values.len(),
            });
        }
        if breakpoints.is_empty() {
            return Err(ConfigError::EmptyTable);
        }
        if breakpoints.len() > MAX_TABLE_POINTS {
            return Err(ConfigError::TooManyPoints {
                len: breakpoints.len(),
                max: MAX_TABLE_POINTS,
            });
        }

        for (index, (bp, value)) in breakpoints.iter().zip(values).enumerate() {
            if !bp.is_finite() || !value.is_finite() {
                return Err(ConfigError::NonFinite { index });
            }
            if index > 0 && *bp < breakpoints[index - 1] {
                return Err(ConfigError::NonMonotonic { index });
            }
        }

        let mut table = Self {
            breakpoints: Vec::new(),
            values: Vec::new(),
        };
        let too_many = |_| ConfigError::TooManyPoints {
            len: breakpoints.len(),
            max: MAX_TABLE_POINTS,
        };
        table
            .breakpoints
            .extend_from_slice(breakpoints)
            .map_err(too_many)?;
        table.values.extend_from_slice(values).map_err(too_many)?;
        Ok(table)
    }

    /// Table that evaluates to `value` everywhere
    pub fn constant(value: f32) -> Self {
        let mut breakpoints = Vec::new();
        let mut values = Vec::new();
        // Capacity is at least one point
        let _ = breakpoints.push(0.0);
        let _ = values.push(if value.is_finite() { value } else { 0.0 });
        Self {
            breakpoints,
            values,
        }
    }

    /// Build a built-in table, substituting `fallback` if it does not validate.
    pub(crate) fn builtin(breakpoints: &[f32], values: &[f32], fallback: f32) -> Self {
        Self::new(breakpoints, values).unwrap_or_else(|_| Self::constant(fallback))
    }

    /// Evaluate the table at `x`
    pub fn eval(&self, x: f32) -> f32 {
        interp(x, &self.breakpoints, &self.values)
    }

    /// Breakpoints in ascending order
    pub fn breakpoints(&self) -> &[f32] {
        &self.breakpoints
    }

    /// Values matching `breakpoints()`
    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

/// Piecewise-linear interpolation over raw slices.
///
/// Clamps to the end values outside `[xp[0], xp[last]]`. A NaN `x` evaluates
/// to the first value. Returns 0.0 for empty or mismatched slices.
pub fn interp(x: f32, xp: &[f32], fp: &[f32]) -> f32 {
    let n = xp.len().min(fp.len());
    if n == 0 {
        return 0.0;
    }
    if x.is_nan() || x <= xp[0] {
        return fp[0];
    }
    if x >= xp[n - 1] {
        return fp[n - 1];
    }

    for i in 0..n - 1 {
        let (x0, x1) = (xp[i], xp[i + 1]);
        if x >= x0 && x < x1 {
            let span = x1 - x0;
            if span <= 0.0 {
                return fp[i + 1];
            }
            let ratio = (x - x0) / span;
            return fp[i] + ratio * (fp[i + 1] - fp[i]);
        }
    }

    fp[n - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock() -> InterpTable {
        InterpTable::new(&[0.0, 10.0, 25.0, 40.0], &[1.6, 1.2, 0.8, 0.6]).unwrap()
    }

    #[test]
    fn test_eval_at_breakpoints() {
        let table = stock();
        assert!((table.eval(0.0) - 1.6).abs() < 1e-6);
        assert!((table.eval(10.0) - 1.2).abs() < 1e-6);
        assert!((table.eval(40.0) - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_eval_between_breakpoints() {
        let table = stock();
        // Halfway between 10 (1.2) and 25 (0.8)
        assert!((table.eval(17.5) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_eval_clamps_outside_domain() {
        let table = stock();
        assert!((table.eval(-5.0) - 1.6).abs() < 1e-6);
        assert!((table.eval(100.0) - 0.6).abs() < 1e-6);
        assert!((table.eval(f32::INFINITY) - 0.6).abs() < 1e-6);
        assert!((table.eval(f32::NAN) - 1.6).abs() < 1e-6);
    }

    #[test]
    fn test_repeated_breakpoint_steps() {
        let table = InterpTable::new(&[0.0, 5.0, 5.0, 10.0], &[1.0, 1.0, 2.0, 2.0]).unwrap();
        assert!((table.eval(4.0) - 1.0).abs() < 1e-6);
        assert!((table.eval(5.0) - 2.0).abs() < 1e-6);
        assert!((table.eval(7.0) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_non_monotonic() {
        let err = InterpTable::new(&[0.0, 10.0, 5.0], &[1.0, 1.0, 1.0]).unwrap_err();
        assert_eq!(err, ConfigError::NonMonotonic { index: 2 });
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let err = InterpTable::new(&[0.0, 10.0], &[1.0]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::LengthMismatch {
                breakpoints: 2,
                values: 1
            }
        );
    }

    #[test]
    fn test_rejects_empty_and_non_finite() {
        assert_eq!(
            InterpTable::new(&[], &[]).unwrap_err(),
            ConfigError::EmptyTable
        );
        assert_eq!(
            InterpTable::new(&[0.0, 1.0], &[1.0, f32::NAN]).unwrap_err(),
            ConfigError::NonFinite { index: 1 }
        );
    }

    #[test]
    fn test_rejects_too_many_points() {
        let xs = [0.0; MAX_TABLE_POINTS + 1];
        let err = InterpTable::new(&xs, &xs).unwrap_err();
        assert_eq!(
            err,
            ConfigError::TooManyPoints {
                len: MAX_TABLE_POINTS + 1,
                max: MAX_TABLE_POINTS
            }
        );
    }

    #[test]
    fn test_constant_table() {
        let table = InterpTable::constant(-1.2);
        assert!((table.eval(0.0) + 1.2).abs() < 1e-6);
        assert!((table.eval(30.0) + 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_builtin_falls_back_on_bad_input() {
        let table = InterpTable::builtin(&[1.0, 0.0], &[1.0, 2.0], 0.5);
        assert!((table.eval(0.5) - 0.5).abs() < 1e-6);
    }
}
