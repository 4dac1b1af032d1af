use std::time::Duration;

/// Pacing of the cycle runner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimeMode {
    /// Cycles run back to back, as fast as possible.
    #[default]
    FreeRunning,
    /// Cycles run at a scaled rate relative to wall-clock time.
    Scaled { factor: f32 },
}

impl TimeMode {
    /// Real-time pacing
    pub const REAL_TIME: TimeMode = TimeMode::Scaled { factor: 1.0 };

    /// Wall-clock period between cycles, `None` when free running.
    ///
    /// Non-positive or non-finite factors run free.
    pub fn period(&self, tick: Duration) -> Option<Duration> {
        match *self {
            TimeMode::FreeRunning => None,
            TimeMode::Scaled { factor } if factor.is_finite() && factor > 0.0 => {
                Some(tick.div_f32(factor))
            }
            TimeMode::Scaled { .. } => None,
        }
    }
}
