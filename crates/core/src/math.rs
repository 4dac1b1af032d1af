//! Small numeric helpers shared by the shaping and arbitration code

/// Clamp `x` into `[lo, hi]`.
///
/// Unlike `f32::clamp` this never panics: when `lo > hi` the result is `hi`,
/// and a NaN `x` yields `lo` (before the upper bound is applied).
pub fn clip(x: f32, lo: f32, hi: f32) -> f32 {
    x.max(lo).min(hi)
}

/// `value` if finite, otherwise `fallback`
pub fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_in_range() {
        assert_eq!(clip(3.0, 1.0, 5.0), 3.0);
        assert_eq!(clip(0.0, 1.0, 5.0), 1.0);
        assert_eq!(clip(9.0, 1.0, 5.0), 5.0);
    }

    #[test]
    fn test_clip_inverted_bounds_returns_upper() {
        assert_eq!(clip(3.0, 5.0, 1.0), 1.0);
    }

    #[test]
    fn test_clip_nan_takes_lower_bound() {
        assert_eq!(clip(f32::NAN, 1.0, 5.0), 1.0);
    }

    #[test]
    fn test_finite_or() {
        assert_eq!(finite_or(2.0, 1.0), 2.0);
        assert_eq!(finite_or(f32::INFINITY, 1.0), 1.0);
        assert_eq!(finite_or(f32::NAN, 1.0), 1.0);
    }
}
