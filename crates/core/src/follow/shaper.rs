//! Follow dynamics shaping
//!
//! Adjusts the MPC jerk costs and following time from the lead's relative
//! motion. Two passes exist and at most one applies per cycle:
//!
//! - closing: the lead pulls away, jerk costs and follow time are divided
//!   by an offset so the car keeps up more eagerly
//! - opening: the lead is slower, jerk costs are multiplied (bounded) so
//!   braking starts earlier and softer, and a slower-lead flag is raised
//!
//! Every divisor is floored at 1 and every offset is clamped before use.

use super::personality::{JerkFactors, PersonalityTable, PersonalityTuning, TrafficModeTuning};
use super::tracker::LeadTracker;
use crate::constants::{CITY_SPEED_LIMIT, COMFORT_BRAKE, STOP_DISTANCE};
use crate::math::{clip, finite_or};
use crate::vehicle::{Gear, LeadState, Personality};

/// Lowest follow time ever emitted (s)
pub const T_FOLLOW_MIN: f32 = 0.01;
/// Highest follow time ever emitted (s)
pub const T_FOLLOW_MAX: f32 = 5.0;

/// Shaping configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowSettings {
    pub personalities: PersonalityTable,
    pub traffic: TrafficModeTuning,
    /// Extra distance (m) kept to a stopped lead below city speed
    pub increased_stopping_distance: f32,
    /// Enables the closing pass
    pub aggressive_acceleration: bool,
    /// Enables the opening pass (flag only)
    pub conditional_mode: bool,
    /// Enables the opening pass including jerk / follow time shaping
    pub smoother_braking: bool,
    /// Braking offset must exceed the far-lead term by more than this
    pub slower_lead_margin: f32,
    /// Jerk coefficient safety range
    pub jerk_min: f32,
    pub jerk_max: f32,
}

impl Default for FollowSettings {
    fn default() -> Self {
        Self {
            personalities: PersonalityTable::stock(),
            traffic: TrafficModeTuning::default(),
            increased_stopping_distance: 0.0,
            aggressive_acceleration: false,
            conditional_mode: false,
            smoother_braking: false,
            slower_lead_margin: 1.0,
            jerk_min: 1e-3,
            jerk_max: 25.0,
        }
    }
}

/// Per-cycle inputs
#[derive(Debug, Clone, Copy, Default)]
pub struct FollowInputs {
    /// Ego speed (m/s, non-negative)
    pub v_ego: f32,
    pub gear: Gear,
    pub lead: LeadState,
    pub personality: Personality,
    pub traffic_mode: bool,
}

/// Shaped values for this cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowOutput {
    /// Shaped jerk coefficients
    pub jerk: JerkFactors,
    /// Unshaped jerk coefficients
    pub base_jerk: JerkFactors,
    /// Shaped follow time (s)
    pub t_follow: f32,
    /// Unshaped follow time (s)
    pub base_t_follow: f32,
    /// The lead is meaningfully slower than ego
    pub slower_lead: bool,
    /// Stop distance including any increase (m)
    pub stopping_distance: f32,
}

/// Jerk / follow time shaper, owns the sticky lead tracker
#[derive(Debug, Clone, Default)]
pub struct FollowDynamicsShaper {
    tracker: LeadTracker,
}

impl FollowDynamicsShaper {
    pub const fn new() -> Self {
        Self {
            tracker: LeadTracker::new(),
        }
    }

    /// Shape this cycle's jerk and follow time.
    ///
    /// Shaping needs a tracked lead, a present lead and a driving gear;
    /// otherwise the base values pass through unchanged.
    pub fn update(&self, settings: &FollowSettings, inputs: &FollowInputs) -> FollowOutput {
        let v_ego = inputs.v_ego;
        let base = self.base_tuning(settings, inputs);

        let distance_offset = if inputs.traffic_mode {
            0.0
        } else {
            (settings.increased_stopping_distance + (CITY_SPEED_LIMIT - v_ego).min(0.0)).max(0.0)
        };
        let stopping_distance = STOP_DISTANCE + distance_offset;

        let mut output = FollowOutput {
            jerk: base.jerk,
            base_jerk: base.jerk,
            t_follow: base.t_follow,
            base_t_follow: base.t_follow,
            slower_lead: false,
            stopping_distance,
        };

        let (distance, v_lead) = match inputs.lead {
            LeadState::Present {
                distance, velocity, ..
            } if self.tracker.is_tracking() && inputs.gear.is_driving() => (distance, velocity),
            _ => return output,
        };
        let lead_distance = distance - distance_offset;

        if settings.aggressive_acceleration && v_lead > v_ego {
            let margin = (lead_distance - v_ego * output.t_follow).max(1.0);
            let standstill = (stopping_distance - v_ego).max(0.0) * (v_lead - v_ego).max(0.0);
            let offset = clip((v_lead - v_ego) + standstill - COMFORT_BRAKE, 1.0, margin);
            output.jerk.acceleration = base.jerk.acceleration / offset;
            output.jerk.speed = base.jerk.speed / offset;
            output.t_follow /= offset;
        }

        if (settings.conditional_mode || settings.smoother_braking) && v_lead < v_ego {
            let margin = (lead_distance - v_lead * output.t_follow).max(1.0);
            let far_lead = (lead_distance - v_ego * output.t_follow - stopping_distance
                + (v_lead - CITY_SPEED_LIMIT))
                .max(0.0);
            let offset = clip((v_ego - v_lead) + far_lead - COMFORT_BRAKE, 1.0, margin);
            if settings.smoother_braking {
                output.jerk.acceleration = base.jerk.acceleration * offset.min(COMFORT_BRAKE / 2.0);
                output.jerk.speed = base.jerk.speed * offset.min(COMFORT_BRAKE * 2.0);
                output.t_follow /= offset;
            }
            output.slower_lead = (offset - far_lead).max(1.0) > settings.slower_lead_margin;
        }

        output.jerk = sanitize_jerk(output.jerk, base.jerk, settings);
        output.t_follow = sanitize_t_follow(output.t_follow, base.t_follow);
        output
    }

    /// Refresh the sticky tracker; call once at the end of each cycle.
    pub fn refresh_tracking(&mut self, v_ego: f32, lead: &LeadState) {
        self.tracker.refresh(v_ego, lead.is_present());
    }

    /// Check if a lead is currently tracked
    pub fn is_tracking(&self) -> bool {
        self.tracker.is_tracking()
    }

    /// Forget any tracked lead
    pub fn reset(&mut self) {
        self.tracker.reset();
    }

    fn base_tuning(&self, settings: &FollowSettings, inputs: &FollowInputs) -> PersonalityTuning {
        let raw = if inputs.traffic_mode {
            settings.traffic.at(inputs.v_ego)
        } else {
            settings.personalities.lookup(inputs.personality)
        };
        let stock = PersonalityTable::stock().lookup(inputs.personality);
        PersonalityTuning {
            jerk: sanitize_jerk(raw.jerk, stock.jerk, settings),
            t_follow: sanitize_t_follow(raw.t_follow, stock.t_follow),
        }
    }
}

fn sanitize_jerk(jerk: JerkFactors, fallback: JerkFactors, settings: &FollowSettings) -> JerkFactors {
    let bound = |value: f32, fallback: f32| {
        clip(finite_or(value, fallback), settings.jerk_min, settings.jerk_max)
    };
    JerkFactors::new(
        bound(jerk.acceleration, fallback.acceleration),
        bound(jerk.speed, fallback.speed),
    )
}

fn sanitize_t_follow(t_follow: f32, fallback: f32) -> f32 {
    clip(finite_or(t_follow, fallback), T_FOLLOW_MIN, T_FOLLOW_MAX)
}
