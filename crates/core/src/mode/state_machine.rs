//! Conditional mode state machine
//!
//! Decides once per cycle whether the planner should run in its cautious
//! (experimental) regime. Noisy boolean signals pass through moving-average
//! filters first so a single-frame spike cannot flip the decision.
//!
//! # Priority
//!
//! 1. Disabled → inactive, filters cleared
//! 2. Standstill → previous decision held
//! 3. Below the low-speed limit → `LowSpeedLead` / `LowSpeed`
//! 4. Approaching an intersection or turn → `Intersection` / `Turn`
//! 5. Smoothed curve detection → `Curve`
//! 6. Smoothed slower lead → `StoppedLead` / `SlowerLead`
//! 7. Turn signal below the signal speed → `Signal`
//! 8. Otherwise inactive

use super::cause::{ModeCause, ModeDecision};
use crate::filter::{MovingAverageFilter, DEFAULT_WINDOW};
use crate::vehicle::{LeadState, NavigationFlags};

/// Conditional mode configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeSettings {
    /// Conditional mode enabled
    pub enabled: bool,
    /// Low-speed limit with a lead (m/s, 0 disables)
    pub limit_lead: f32,
    /// Low-speed limit without a lead (m/s, 0 disables)
    pub limit_no_lead: f32,
    /// React to upcoming intersections and turns
    pub navigation: bool,
    /// ... even with a lead present
    pub navigation_lead: bool,
    /// React to curves
    pub curves: bool,
    /// ... even with a lead present
    pub curves_lead: bool,
    /// React to slower leads
    pub slower_lead: bool,
    /// Lead speed (m/s) at or below which a slower lead counts as stopped
    pub stopped_lead_speed: f32,
    /// React to the turn signal
    pub signal: bool,
    /// Turn signal only counts below this speed (m/s)
    pub signal_speed: f32,
    /// Lateral acceleration (m/s²) at which a curve is detected
    pub curve_trigger_lat_accel: f32,
    /// Lateral acceleration (m/s²) that keeps a detected curve alive
    pub curve_sustain_lat_accel: f32,
    /// Moving-average window (samples)
    pub window: usize,
    /// Fraction of true samples needed to trigger
    pub trigger_fraction: f32,
}

impl Default for ModeSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            limit_lead: 0.0,
            limit_no_lead: 0.0,
            navigation: false,
            navigation_lead: false,
            curves: false,
            curves_lead: false,
            slower_lead: false,
            stopped_lead_speed: 1.0,
            signal: false,
            signal_speed: 24.6,
            curve_trigger_lat_accel: 1.0,
            curve_sustain_lat_accel: 0.9,
            window: DEFAULT_WINDOW,
            trigger_fraction: 0.6,
        }
    }
}

/// Per-cycle inputs
#[derive(Debug, Clone, Copy, Default)]
pub struct ModeInputs {
    /// Ego speed (m/s, non-negative)
    pub v_ego: f32,
    pub standstill: bool,
    pub lead: LeadState,
    /// Road curvature (1/m)
    pub road_curvature: f32,
    /// Slower-lead flag from the follow shaper
    pub slower_lead: bool,
    pub navigation: NavigationFlags,
    pub turn_signal: bool,
}

/// Conditional mode decision with its smoothing state
#[derive(Debug, Clone)]
pub struct ModeDecisionStateMachine {
    curve_filter: MovingAverageFilter,
    slow_lead_filter: MovingAverageFilter,
    curve_detected: bool,
    slow_lead_detected: bool,
    decision: ModeDecision,
}

impl ModeDecisionStateMachine {
    pub fn new(window: usize) -> Self {
        Self {
            curve_filter: MovingAverageFilter::new(window),
            slow_lead_filter: MovingAverageFilter::new(window),
            curve_detected: false,
            slow_lead_detected: false,
            decision: ModeDecision::INACTIVE,
        }
    }

    /// Feed this cycle's samples and decide.
    pub fn update(&mut self, settings: &ModeSettings, inputs: &ModeInputs) -> ModeDecision {
        if self.curve_filter.window() != settings.window {
            self.curve_filter.set_window(settings.window);
            self.slow_lead_filter.set_window(settings.window);
        }

        if !settings.enabled {
            self.reset();
            return self.decision;
        }

        self.sample_curve(settings, inputs);
        self.sample_slow_lead(settings, inputs);

        if inputs.standstill {
            return self.decision;
        }

        let next = self.decide(settings, inputs);
        if next != self.decision {
            log::debug!(
                "conditional mode {:?} -> {:?} at {:.1} m/s",
                self.decision.cause,
                next.cause,
                inputs.v_ego
            );
        }
        self.decision = next;
        next
    }

    /// Last decision
    pub fn decision(&self) -> ModeDecision {
        self.decision
    }

    /// Smoothed curve detection
    pub fn curve_detected(&self) -> bool {
        self.curve_detected
    }

    /// Smoothed slower-lead detection
    pub fn slow_lead_detected(&self) -> bool {
        self.slow_lead_detected
    }

    /// Samples held by the slower-lead filter
    pub fn slow_lead_samples(&self) -> usize {
        self.slow_lead_filter.len()
    }

    /// Clear filters and return to inactive
    pub fn reset(&mut self) {
        self.curve_filter.reset();
        self.slow_lead_filter.reset();
        self.curve_detected = false;
        self.slow_lead_detected = false;
        self.decision = ModeDecision::INACTIVE;
    }

    fn sample_curve(&mut self, settings: &ModeSettings, inputs: &ModeInputs) {
        let curvature = inputs.road_curvature;
        let v_ego = inputs.v_ego;
        let lead_present = inputs.lead.is_present();

        let detected = (settings.curves_lead || !lead_present)
            && curve_speed_below(settings.curve_trigger_lat_accel, curvature, v_ego);
        let sustained = self.curve_detected
            && curve_speed_below(settings.curve_sustain_lat_accel, curvature, v_ego);

        self.curve_filter.add(detected || sustained);
        self.curve_detected = self.curve_filter.reaches(settings.trigger_fraction);
    }

    fn sample_slow_lead(&mut self, settings: &ModeSettings, inputs: &ModeInputs) {
        if inputs.lead.is_present() {
            self.slow_lead_filter.add(inputs.slower_lead);
            self.slow_lead_detected = self.slow_lead_filter.reaches(settings.trigger_fraction);
        } else {
            self.slow_lead_filter.reset();
            self.slow_lead_detected = false;
        }
    }

    fn decide(&self, settings: &ModeSettings, inputs: &ModeInputs) -> ModeDecision {
        let v_ego = inputs.v_ego;
        let lead_velocity = inputs.lead.velocity();
        let lead_present = lead_velocity.is_some();

        let limit = if lead_present {
            settings.limit_lead
        } else {
            settings.limit_no_lead
        };
        if limit > 0.0 && v_ego <= limit {
            return ModeDecision::active(if lead_present {
                ModeCause::LowSpeedLead
            } else {
                ModeCause::LowSpeed
            });
        }

        let nav = inputs.navigation;
        if settings.navigation
            && (nav.approaching_intersection || nav.approaching_turn)
            && (settings.navigation_lead || !lead_present)
        {
            return ModeDecision::active(if nav.approaching_intersection {
                ModeCause::Intersection
            } else {
                ModeCause::Turn
            });
        }

        if settings.curves && self.curve_detected {
            return ModeDecision::active(ModeCause::Curve);
        }

        if settings.slower_lead && self.slow_lead_detected {
            if let Some(v_lead) = lead_velocity {
                return ModeDecision::active(if v_lead <= settings.stopped_lead_speed {
                    ModeCause::StoppedLead
                } else {
                    ModeCause::SlowerLead
                });
            }
        }

        if settings.signal && inputs.turn_signal && v_ego < settings.signal_speed {
            return ModeDecision::active(ModeCause::Signal);
        }

        ModeDecision::INACTIVE
    }
}

impl Default for ModeDecisionStateMachine {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

/// True when the comfortable speed for `curvature` at `lat_accel` is below `v_ego`.
///
/// Non-positive or non-finite curvature never limits speed.
fn curve_speed_below(lat_accel: f32, curvature: f32, v_ego: f32) -> bool {
    if !curvature.is_finite() || curvature <= 0.0 {
        return false;
    }
    libm::sqrtf(lat_accel / curvature) < v_ego
}
