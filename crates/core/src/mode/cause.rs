//! Conditional mode causes and their status codes

use serde::{Deserialize, Serialize};

/// Reason conditional mode is active
///
/// The numeric codes are stable; they are written to the `CEStatus`
/// settings key for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ModeCause {
    #[default]
    Off = 0,
    Intersection = 5,
    Turn = 6,
    LowSpeedLead = 7,
    LowSpeed = 8,
    SlowerLead = 10,
    StoppedLead = 11,
    Curve = 12,
    Signal = 13,
}

impl ModeCause {
    /// Stable status code
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Reverse of `code()`
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ModeCause::Off),
            5 => Some(ModeCause::Intersection),
            6 => Some(ModeCause::Turn),
            7 => Some(ModeCause::LowSpeedLead),
            8 => Some(ModeCause::LowSpeed),
            10 => Some(ModeCause::SlowerLead),
            11 => Some(ModeCause::StoppedLead),
            12 => Some(ModeCause::Curve),
            13 => Some(ModeCause::Signal),
            _ => None,
        }
    }
}

/// One cycle's conditional mode decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModeDecision {
    pub active: bool,
    pub cause: ModeCause,
}

impl ModeDecision {
    /// Inactive, cause `Off`
    pub const INACTIVE: Self = Self {
        active: false,
        cause: ModeCause::Off,
    };

    /// Active for `cause`
    pub const fn active(cause: ModeCause) -> Self {
        Self {
            active: true,
            cause,
        }
    }

    /// Code published to `CEStatus`, 0 while inactive
    pub fn status_code(&self) -> u8 {
        if self.active {
            self.cause.code()
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for cause in [
            ModeCause::Off,
            ModeCause::Intersection,
            ModeCause::Turn,
            ModeCause::LowSpeedLead,
            ModeCause::LowSpeed,
            ModeCause::SlowerLead,
            ModeCause::StoppedLead,
            ModeCause::Curve,
            ModeCause::Signal,
        ] {
            assert_eq!(ModeCause::from_code(cause.code()), Some(cause));
        }
        assert_eq!(ModeCause::from_code(9), None);
    }

    #[test]
    fn test_status_code_zero_when_inactive() {
        assert_eq!(ModeDecision::INACTIVE.status_code(), 0);
        assert_eq!(ModeDecision::active(ModeCause::Curve).status_code(), 12);
    }
}
