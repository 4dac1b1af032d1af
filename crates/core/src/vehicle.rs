//! Per-cycle vehicle input types
//!
//! Ego state, lead track and navigation flags as supplied by perception and
//! the controls layer. All of these are immutable snapshots for one cycle.

use serde::{Deserialize, Serialize};

/// Transmission gear reported by the car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gear {
    #[default]
    Unknown,
    Park,
    Reverse,
    Neutral,
    Drive,
    Eco,
    Sport,
    Low,
}

impl Gear {
    /// True for gears that move the car forward under power
    pub fn is_driving(self) -> bool {
        !matches!(
            self,
            Gear::Park | Gear::Reverse | Gear::Neutral | Gear::Unknown
        )
    }
}

/// Ego vehicle state
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EgoState {
    /// Longitudinal velocity (m/s)
    pub velocity: f32,
    /// Velocity shown on the instrument cluster (m/s)
    pub velocity_cluster: f32,
    /// Longitudinal acceleration (m/s²)
    pub acceleration: f32,
    /// Selected gear
    pub gear: Gear,
    /// Eco drive mode reported outside the gear selector
    pub eco_gear: bool,
    /// Sport drive mode reported outside the gear selector
    pub sport_gear: bool,
    /// Vehicle is held at standstill
    pub standstill: bool,
    /// A turn signal is on
    pub turn_signal: bool,
}

impl EgoState {
    /// Velocity clamped to be non-negative and finite
    pub fn speed(&self) -> f32 {
        if self.velocity.is_finite() {
            self.velocity.max(0.0)
        } else {
            0.0
        }
    }

    /// Cluster velocity, never below `speed()`
    pub fn cluster_speed(&self) -> f32 {
        if self.velocity_cluster.is_finite() {
            self.velocity_cluster.max(self.speed())
        } else {
            self.speed()
        }
    }

    /// Eco mode via gear selector or drive-mode flag
    pub fn in_eco_gear(&self) -> bool {
        self.gear == Gear::Eco || self.eco_gear
    }

    /// Sport mode via gear selector or drive-mode flag
    pub fn in_sport_gear(&self) -> bool {
        self.gear == Gear::Sport || self.sport_gear
    }
}

/// Lead vehicle track
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum LeadState {
    /// No valid track this cycle
    #[default]
    Absent,
    /// Valid track
    Present {
        /// Relative distance (m)
        distance: f32,
        /// Lead velocity minus ego velocity (m/s)
        rel_velocity: f32,
        /// Absolute lead velocity (m/s)
        velocity: f32,
        /// Filtered lead acceleration estimate (m/s²)
        accel_estimate: f32,
    },
}

impl LeadState {
    /// Check if a lead is tracked this cycle
    pub fn is_present(&self) -> bool {
        matches!(self, LeadState::Present { .. })
    }

    /// Absolute lead velocity, if present
    pub fn velocity(&self) -> Option<f32> {
        match self {
            LeadState::Present { velocity, .. } => Some(*velocity),
            LeadState::Absent => None,
        }
    }

    /// Relative distance, if present
    pub fn distance(&self) -> Option<f32> {
        match self {
            LeadState::Present { distance, .. } => Some(*distance),
            LeadState::Absent => None,
        }
    }

    /// Acceleration estimate, if present
    pub fn accel_estimate(&self) -> Option<f32> {
        match self {
            LeadState::Present { accel_estimate, .. } => Some(*accel_estimate),
            LeadState::Absent => None,
        }
    }
}

/// Driving personality selected by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Personality {
    Aggressive,
    #[default]
    Standard,
    Relaxed,
}

impl Personality {
    /// Map a stored integer to a personality (unknown values → Standard)
    pub fn from_i32(value: i32) -> Self {
        match value {
            0 => Personality::Aggressive,
            2 => Personality::Relaxed,
            _ => Personality::Standard,
        }
    }
}

/// Upcoming maneuvers reported by navigation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationFlags {
    /// Approaching an intersection
    pub approaching_intersection: bool,
    /// Approaching a turn
    pub approaching_turn: bool,
}
