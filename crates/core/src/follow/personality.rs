//! Base jerk and follow time per driving personality

use crate::constants::CITY_SPEED_LIMIT;
use crate::table::interp;
use crate::vehicle::Personality;

/// Jerk cost coefficients handed to the MPC
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JerkFactors {
    /// Weight on change of acceleration
    pub acceleration: f32,
    /// Weight on ego speed jerk
    pub speed: f32,
}

impl JerkFactors {
    pub const fn new(acceleration: f32, speed: f32) -> Self {
        Self {
            acceleration,
            speed,
        }
    }
}

/// Base values for one personality
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersonalityTuning {
    pub jerk: JerkFactors,
    /// Following time gap (s)
    pub t_follow: f32,
}

/// Base values for all personalities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersonalityTable {
    pub aggressive: PersonalityTuning,
    pub standard: PersonalityTuning,
    pub relaxed: PersonalityTuning,
}

impl PersonalityTable {
    /// Stock tuning
    pub const fn stock() -> Self {
        Self {
            aggressive: PersonalityTuning {
                jerk: JerkFactors::new(0.5, 0.5),
                t_follow: 1.25,
            },
            standard: PersonalityTuning {
                jerk: JerkFactors::new(1.0, 1.0),
                t_follow: 1.45,
            },
            relaxed: PersonalityTuning {
                jerk: JerkFactors::new(1.0, 1.0),
                t_follow: 1.75,
            },
        }
    }

    /// Direct lookup, no interpolation
    pub fn lookup(&self, personality: Personality) -> PersonalityTuning {
        match personality {
            Personality::Aggressive => self.aggressive,
            Personality::Standard => self.standard,
            Personality::Relaxed => self.relaxed,
        }
    }
}

impl Default for PersonalityTable {
    fn default() -> Self {
        Self::stock()
    }
}

/// Stop-and-go tuning, interpolated between standstill and city speed.
///
/// Each pair is `[value at 0 m/s, value at CITY_SPEED_LIMIT]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrafficModeTuning {
    pub jerk_acceleration: [f32; 2],
    pub jerk_speed: [f32; 2],
    pub t_follow: [f32; 2],
}

impl TrafficModeTuning {
    const BREAKPOINTS: [f32; 2] = [0.0, CITY_SPEED_LIMIT];

    /// Base values at `v_ego`
    pub fn at(&self, v_ego: f32) -> PersonalityTuning {
        let bp = &Self::BREAKPOINTS;
        PersonalityTuning {
            jerk: JerkFactors::new(
                interp(v_ego, bp, &self.jerk_acceleration),
                interp(v_ego, bp, &self.jerk_speed),
            ),
            t_follow: interp(v_ego, bp, &self.t_follow),
        }
    }
}

impl Default for TrafficModeTuning {
    fn default() -> Self {
        let aggressive = PersonalityTable::stock().aggressive;
        Self {
            jerk_acceleration: [0.5, aggressive.jerk.acceleration],
            jerk_speed: [0.75, aggressive.jerk.speed],
            t_follow: [0.5, aggressive.t_follow],
        }
    }
}
