//! Lightweight longitudinal simulator.
//!
//! Point-mass ego and lead vehicles on a single lane, a scripted road
//! curvature profile and a simple acceleration controller standing in for
//! the MPC. Suitable for CI and scenario regression runs.

use std::collections::VecDeque;

use adaptive_long_core::geometry::{LaneModel, PathPrediction, Polyline, MODEL_POINTS};
use adaptive_long_core::math::clip;
use adaptive_long_core::planner::{ControlsState, CycleInputs, CycleResult};
use adaptive_long_core::vehicle::{EgoState, Gear, LeadState, NavigationFlags};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::adapter::{Frame, VehicleAdapter};
use crate::error::SimError;
use crate::scenario::{CurveSegment, Event, Scenario, SettingValue, TimedEvent};

/// Lead detection range (m)
const RADAR_RANGE: f32 = 200.0;

/// Prediction horizon of the path samples (s)
const PATH_HORIZON: f32 = 10.0;

/// Below this speed the ego reports standstill (m/s)
const STANDSTILL_SPEED: f32 = 0.01;

// Stand-in controller gains
const K_CRUISE: f32 = 0.4;
const K_GAP: f32 = 0.2;
const K_REL_SPEED: f32 = 0.8;

#[derive(Debug, Clone, Copy)]
struct Body {
    /// Position along the road (m)
    position: f32,
    /// Speed (m/s)
    velocity: f32,
    /// Acceleration (m/s²)
    acceleration: f32,
}

#[derive(Debug, Clone, Copy)]
struct Lead {
    body: Body,
    target_velocity: f32,
    accel_limit: f32,
}

/// Scenario-driven longitudinal simulator.
pub struct LongitudinalSim {
    name: String,
    dt: f32,
    duration_us: u64,
    sim_time_us: u64,
    ego: Body,
    gear: Gear,
    cluster_offset: f32,
    lead: Option<Lead>,
    controls: ControlsState,
    /// Experimental mode chosen by the driver, independent of conditional mode
    driver_experimental: bool,
    navigation: NavigationFlags,
    turn_signal: bool,
    map_turn_speed: Option<f32>,
    desired_speed_limit: f32,
    road: Vec<CurveSegment>,
    lanes: LaneModel,
    events: VecDeque<TimedEvent>,
    pending_settings: Vec<(String, SettingValue)>,
    noise_m: f32,
    rng: StdRng,
    collided: bool,
}

impl LongitudinalSim {
    /// Create a simulator in the scenario's initial state.
    pub fn from_scenario(scenario: &Scenario) -> Self {
        let rng = match scenario.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let lead = scenario.lead.map(|setup| Lead {
            body: Body {
                position: setup.distance,
                velocity: setup.velocity.max(0.0),
                acceleration: 0.0,
            },
            target_velocity: setup.velocity.max(0.0),
            accel_limit: 1.5,
        });

        Self {
            name: scenario.name.clone(),
            dt: scenario.dt(),
            duration_us: (f64::from(scenario.duration_s) * 1e6) as u64,
            sim_time_us: 0,
            ego: Body {
                position: 0.0,
                velocity: scenario.ego.velocity,
                acceleration: 0.0,
            },
            gear: scenario.ego.gear,
            cluster_offset: scenario.ego.cluster_offset,
            lead,
            controls: scenario.controls,
            driver_experimental: scenario.controls.experimental_mode,
            navigation: NavigationFlags::default(),
            turn_signal: false,
            map_turn_speed: None,
            desired_speed_limit: 0.0,
            road: scenario.road.clone(),
            lanes: scenario.lane_width.map(straight_lanes).unwrap_or_default(),
            events: scenario.events.iter().cloned().collect(),
            pending_settings: Vec::new(),
            noise_m: scenario.distance_noise_m.max(0.0),
            rng,
            collided: false,
        }
    }

    /// Ego speed (m/s)
    pub fn ego_speed(&self) -> f32 {
        self.ego.velocity
    }

    /// Lead speed (m/s), if a lead exists
    pub fn lead_speed(&self) -> Option<f32> {
        self.lead.map(|lead| lead.body.velocity)
    }

    /// The ego ran into the lead at some point
    pub fn collided(&self) -> bool {
        self.collided
    }

    fn sim_time_s(&self) -> f32 {
        self.sim_time_us as f32 / 1e6
    }

    fn apply_due_events(&mut self) {
        let now = self.sim_time_s();
        while self.events.front().is_some_and(|e| e.at_s <= now) {
            let Some(timed) = self.events.pop_front() else {
                break;
            };
            tracing::debug!(t = now, event = ?timed.event, "scenario event");
            self.apply_event(timed.event);
        }
    }

    fn apply_event(&mut self, event: Event) {
        match event {
            Event::LeadSpeed { velocity, accel } => {
                if let Some(lead) = self.lead.as_mut() {
                    lead.target_velocity = velocity.max(0.0);
                    lead.accel_limit = accel.abs().max(0.1);
                }
            }
            Event::LeadLost => self.lead = None,
            Event::LeadCutIn { distance, velocity } => {
                self.lead = Some(Lead {
                    body: Body {
                        position: self.ego.position + distance,
                        velocity: velocity.max(0.0),
                        acceleration: 0.0,
                    },
                    target_velocity: velocity.max(0.0),
                    accel_limit: 1.5,
                });
            }
            Event::SetSpeed { kph } => self.controls.v_cruise_kph = kph,
            Event::Engage { enabled } => self.controls.enabled = enabled,
            Event::Navigation { intersection, turn } => {
                self.navigation = NavigationFlags {
                    approaching_intersection: intersection,
                    approaching_turn: turn,
                };
            }
            Event::MapTurnSpeed { speed } => self.map_turn_speed = speed,
            Event::SpeedLimit { speed } => self.desired_speed_limit = speed,
            Event::TurnSignal { on } => self.turn_signal = on,
            Event::Personality { personality } => self.controls.personality = personality,
            Event::TrafficMode { enabled } => self.controls.traffic_mode = enabled,
            Event::Setting { name, value } => self.pending_settings.push((name, value)),
        }
    }

    fn curvature_at(&self, position: f32) -> f32 {
        self.road
            .iter()
            .find(|segment| position >= segment.start_m && position < segment.end_m)
            .map_or(0.0, |segment| segment.curvature)
    }

    fn path(&self) -> PathPrediction {
        let v = self.ego.velocity;
        let mut velocity = [0.0_f32; MODEL_POINTS];
        let mut yaw_rate = [0.0_f32; MODEL_POINTS];
        for i in 0..MODEL_POINTS {
            let frac = i as f32 / (MODEL_POINTS - 1) as f32;
            let t = PATH_HORIZON * frac * frac;
            velocity[i] = v;
            yaw_rate[i] = v * self.curvature_at(self.ego.position + v * t);
        }
        PathPrediction::from_samples(&velocity, &yaw_rate)
    }

    fn lead_state(&mut self) -> LeadState {
        let Some(lead) = self.lead else {
            return LeadState::Absent;
        };
        let gap = lead.body.position - self.ego.position;
        if gap > RADAR_RANGE {
            return LeadState::Absent;
        }
        let noise = if self.noise_m > 0.0 {
            self.rng.gen_range(-self.noise_m..=self.noise_m)
        } else {
            0.0
        };
        LeadState::Present {
            distance: (gap + noise).max(0.1),
            rel_velocity: lead.body.velocity - self.ego.velocity,
            velocity: lead.body.velocity,
            accel_estimate: lead.body.acceleration,
        }
    }

    fn command(&self, result: &CycleResult) -> f32 {
        if !self.controls.enabled {
            return 0.0;
        }
        let v = self.ego.velocity;
        let mut accel = K_CRUISE * (result.cruise_target() - v);

        if let Some(lead) = self.lead {
            let gap = lead.body.position - self.ego.position;
            if gap <= RADAR_RANGE {
                let desired_gap = result.follow.stopping_distance + v * result.t_follow();
                let follow = K_GAP * (gap - desired_gap) + K_REL_SPEED * (lead.body.velocity - v);
                accel = accel.min(follow);
            }
        }
        clip(accel, result.min_accel(), result.max_accel())
    }

    fn step_lead(&mut self) {
        let dt = self.dt;
        if let Some(lead) = self.lead.as_mut() {
            let body = &mut lead.body;
            let wanted = (lead.target_velocity - body.velocity) / dt;
            body.acceleration = clip(wanted, -lead.accel_limit, lead.accel_limit);
            body.velocity = (body.velocity + body.acceleration * dt).max(0.0);
            body.position += body.velocity * dt;
        }
    }

    fn step_ego(&mut self, accel: f32) {
        let dt = self.dt;
        let ego = &mut self.ego;
        ego.velocity = (ego.velocity + accel * dt).max(0.0);
        ego.acceleration = if ego.velocity > 0.0 { accel } else { 0.0 };
        ego.position += ego.velocity * dt;
    }
}

#[async_trait]
impl VehicleAdapter for LongitudinalSim {
    fn name(&self) -> &str {
        &self.name
    }

    async fn sense(&mut self) -> Result<Option<Frame>, SimError> {
        if self.sim_time_us >= self.duration_us {
            return Ok(None);
        }
        self.apply_due_events();

        let v = self.ego.velocity;
        let ego = EgoState {
            velocity: v,
            velocity_cluster: v * (1.0 + self.cluster_offset),
            acceleration: self.ego.acceleration,
            gear: self.gear,
            eco_gear: self.gear == Gear::Eco,
            sport_gear: self.gear == Gear::Sport,
            standstill: v < STANDSTILL_SPEED,
            turn_signal: self.turn_signal,
        };
        let inputs = CycleInputs {
            ego,
            lead: self.lead_state(),
            path: self.path(),
            lanes: self.lanes.clone(),
            navigation: self.navigation,
            map_turn_speed: self.map_turn_speed,
            desired_speed_limit: self.desired_speed_limit,
            controls: self.controls,
        };

        Ok(Some(Frame {
            inputs,
            settings: std::mem::take(&mut self.pending_settings),
        }))
    }

    async fn actuate(&mut self, result: &CycleResult) -> Result<(), SimError> {
        let accel = self.command(result);
        // Conditional mode switches the controls into experimental mode
        self.controls.experimental_mode = self.driver_experimental || result.decision.active;
        self.step_lead();
        self.step_ego(accel);

        if let Some(gap) = self.lead_gap() {
            if gap <= 0.0 && !self.collided {
                tracing::warn!(t = self.sim_time_s(), "ego reached the lead vehicle");
                self.collided = true;
            }
        }
        self.sim_time_us += (f64::from(self.dt) * 1e6) as u64;
        Ok(())
    }

    fn sim_time_us(&self) -> u64 {
        self.sim_time_us
    }

    fn lead_gap(&self) -> Option<f32> {
        self.lead
            .map(|lead| lead.body.position - self.ego.position)
    }
}

/// Straight lane lines and road edges for a three-lane road
fn straight_lanes(width: f32) -> LaneModel {
    let x: Vec<f32> = (0..=10).map(|i| i as f32 * 10.0).collect();
    let line = |offset: f32| Polyline::from_points(&x, &vec![offset; x.len()]);
    LaneModel {
        lane_lines: [
            line(1.5 * width),
            line(0.5 * width),
            line(-0.5 * width),
            line(-1.5 * width),
        ],
        road_edges: [line(1.5 * width + 0.5), line(-1.5 * width - 0.5)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(json: &str) -> Scenario {
        Scenario::from_json(json).unwrap()
    }

    #[tokio::test]
    async fn test_sense_reports_lead() {
        let mut sim = LongitudinalSim::from_scenario(&scenario(
            r#"{ "name": "t", "seed": 1, "ego": { "velocity": 20.0 },
                 "lead": { "distance": 40.0, "velocity": 15.0 } }"#,
        ));
        let frame = sim.sense().await.unwrap().unwrap();
        assert_eq!(frame.inputs.lead.distance(), Some(40.0));
        assert_eq!(frame.inputs.lead.velocity(), Some(15.0));
        assert!(!frame.inputs.ego.standstill);
    }

    #[tokio::test]
    async fn test_lead_out_of_range_is_absent() {
        let mut sim = LongitudinalSim::from_scenario(&scenario(
            r#"{ "name": "t", "lead": { "distance": 500.0, "velocity": 15.0 } }"#,
        ));
        let frame = sim.sense().await.unwrap().unwrap();
        assert!(!frame.inputs.lead.is_present());
    }

    #[tokio::test]
    async fn test_curve_ahead_in_path() {
        let sim = LongitudinalSim::from_scenario(&scenario(
            r#"{ "name": "t", "ego": { "velocity": 20.0 },
                 "road": [{ "start_m": 50.0, "end_m": 150.0, "curvature": 0.01 }] }"#,
        ));
        let path = sim.path();
        let curvature = adaptive_long_core::geometry::road_curvature(&path, 20.0);
        assert!((curvature - 0.01).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_setting_events_forwarded_once() {
        let mut sim = LongitudinalSim::from_scenario(&scenario(
            r#"{ "name": "t", "events": [
                 { "at_s": 0.0, "type": "setting", "name": "SLCConfirmed", "value": true } ] }"#,
        ));
        let first = sim.sense().await.unwrap().unwrap();
        assert_eq!(first.settings.len(), 1);
        let second = sim.sense().await.unwrap().unwrap();
        assert!(second.settings.is_empty());
    }

    #[test]
    fn test_straight_lanes_widths() {
        let (left, right) = straight_lanes(3.5).lane_widths();
        assert!((left - 3.5).abs() < 1e-4);
        assert!((right - 3.5).abs() < 1e-4);
    }
}
