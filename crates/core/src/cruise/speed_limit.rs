//! Speed-limit confirmation gate

/// Holds the accepted speed-limit target between cycles.
///
/// With confirmation enabled, a new desired limit only replaces an active
/// target once the driver confirms it; the confirmation is one-shot.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpeedLimitGate {
    target: f32,
}

/// Result of one gate update
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpeedLimitOutcome {
    /// Accepted target (m/s, 0 when inactive)
    pub target: f32,
    /// The confirmation flag was used and must be cleared
    pub confirmation_consumed: bool,
}

impl SpeedLimitGate {
    pub const fn new() -> Self {
        Self { target: 0.0 }
    }

    /// Feed the desired limit for this cycle.
    ///
    /// - `enabled = false` clears the target
    /// - `require_confirmation` with an active target: take `desired` only
    ///   when `confirmed`, otherwise keep the current target
    /// - otherwise `desired` is taken directly
    pub fn update(
        &mut self,
        enabled: bool,
        require_confirmation: bool,
        desired: f32,
        confirmed: bool,
    ) -> SpeedLimitOutcome {
        let desired = if desired.is_finite() {
            desired.max(0.0)
        } else {
            0.0
        };

        if !enabled {
            self.target = 0.0;
            return SpeedLimitOutcome::default();
        }

        let mut confirmation_consumed = false;
        if require_confirmation && self.target != 0.0 {
            if confirmed {
                self.target = desired;
                confirmation_consumed = true;
            }
        } else {
            self.target = desired;
        }

        SpeedLimitOutcome {
            target: self.target,
            confirmation_consumed,
        }
    }

    /// Accepted target (m/s)
    pub fn target(&self) -> f32 {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_clears_target() {
        let mut gate = SpeedLimitGate::new();
        gate.update(true, false, 20.0, false);
        let outcome = gate.update(false, false, 20.0, false);
        assert_eq!(outcome.target, 0.0);
        assert_eq!(gate.target(), 0.0);
    }

    #[test]
    fn test_first_limit_accepted_without_confirmation() {
        let mut gate = SpeedLimitGate::new();
        let outcome = gate.update(true, true, 22.0, false);
        assert_eq!(outcome.target, 22.0);
        assert!(!outcome.confirmation_consumed);
    }

    #[test]
    fn test_change_held_until_confirmed() {
        let mut gate = SpeedLimitGate::new();
        gate.update(true, true, 22.0, false);

        for _ in 0..3 {
            let outcome = gate.update(true, true, 13.0, false);
            assert_eq!(outcome.target, 22.0);
        }

        let outcome = gate.update(true, true, 13.0, true);
        assert_eq!(outcome.target, 13.0);
        assert!(outcome.confirmation_consumed);
    }

    #[test]
    fn test_without_confirmation_follows_desired() {
        let mut gate = SpeedLimitGate::new();
        gate.update(true, false, 22.0, false);
        let outcome = gate.update(true, false, 13.0, false);
        assert_eq!(outcome.target, 13.0);
        assert!(!outcome.confirmation_consumed);
    }

    #[test]
    fn test_invalid_desired_is_zero() {
        let mut gate = SpeedLimitGate::new();
        assert_eq!(gate.update(true, false, f32::NAN, false).target, 0.0);
        assert_eq!(gate.update(true, false, -4.0, false).target, 0.0);
    }
}
