//! Planning cycle
//!
//! Runs every stage once per cycle in dependency order:
//!
//! 1. Acceleration limits
//! 2. Follow shaping
//! 3. Geometry (road curvature, lane widths)
//! 4. Cruise target arbitration
//! 5. Conditional mode decision
//! 6. Lead tracker refresh for the next cycle
//!
//! Limits and follow shaping are independent of each other. Curvature is
//! computed before both the arbitrator and the mode decision consume it.

use super::config::PlannerConfig;
use super::inputs::CycleInputs;
use super::result::CycleResult;
use crate::accel::{AccelInputs, AccelTables, AccelerationLimitSelector};
use crate::cruise::{CruiseInputs, CruiseTargetArbitrator};
use crate::error::ConfigError;
use crate::follow::{FollowDynamicsShaper, FollowInputs};
use crate::geometry::road_curvature;
use crate::mode::{ModeDecisionStateMachine, ModeInputs};
use crate::parameters::{status, ParameterStore};

/// Longitudinal planner
///
/// Owns all cross-cycle state. Each stage's state is written by that stage
/// only.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    selector: AccelerationLimitSelector,
    follow: FollowDynamicsShaper,
    mode: ModeDecisionStateMachine,
    cruise: CruiseTargetArbitrator,
    config: PlannerConfig,
    revision: Option<u32>,
}

impl Planner {
    /// Planner with the built-in acceleration tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Planner with custom acceleration tables
    ///
    /// # Errors
    ///
    /// Returns the validation error of the first invalid table.
    pub fn with_tables(tables: AccelTables) -> Result<Self, ConfigError> {
        Ok(Self {
            selector: AccelerationLimitSelector::new(tables)?,
            ..Self::default()
        })
    }

    /// Configuration used by the last `run_cycle`
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Run one cycle with an explicit configuration.
    pub fn update(&mut self, config: &PlannerConfig, inputs: &CycleInputs) -> CycleResult {
        let ego = &inputs.ego;
        let controls = &inputs.controls;
        let v_ego = ego.speed();

        let accel_inputs = AccelInputs {
            v_ego,
            eco_gear: ego.in_eco_gear(),
            sport_gear: ego.in_sport_gear(),
            experimental_mode: controls.experimental_mode,
            lead: inputs.lead,
            cruise_target_pending: self.cruise.turn_speed_pending(controls.v_cruise_kph),
        };
        let limits = match self.selector.select(&config.accel, &accel_inputs) {
            Ok(limits) => limits,
            Err(err) => {
                log::error!("acceleration limits rejected ({}), using stock", err);
                self.selector.stock(v_ego)
            }
        };

        let follow = self.follow.update(
            &config.follow,
            &FollowInputs {
                v_ego,
                gear: ego.gear,
                lead: inputs.lead,
                personality: controls.personality,
                traffic_mode: controls.traffic_mode,
            },
        );

        let curvature = road_curvature(&inputs.path, v_ego);
        let (lane_width_left, lane_width_right) = if config.general.lane_detection
            && v_ego >= config.general.min_lane_change_speed
        {
            inputs.lanes.lane_widths()
        } else {
            (0.0, 0.0)
        };

        let cruise = self.cruise.update(
            &config.cruise,
            &CruiseInputs {
                v_ego,
                v_ego_cluster: ego.cluster_speed(),
                v_cruise_kph: controls.v_cruise_kph,
                engaged: controls.enabled,
                map_turn_speed: inputs.map_turn_speed,
                desired_speed_limit: inputs.desired_speed_limit,
                road_curvature: curvature,
                speed_limit_confirmed: controls.speed_limit_confirmed,
            },
        );

        let decision = self.mode.update(
            &config.mode,
            &ModeInputs {
                v_ego,
                standstill: ego.standstill,
                lead: inputs.lead,
                road_curvature: curvature,
                slower_lead: follow.slower_lead,
                navigation: inputs.navigation,
                turn_signal: ego.turn_signal,
            },
        );

        self.follow.refresh_tracking(v_ego, &inputs.lead);

        CycleResult {
            limits,
            follow,
            cruise,
            decision,
            road_curvature: curvature,
            lane_width_left,
            lane_width_right,
            valid: controls.inputs_valid,
        }
    }

    /// Run one cycle against the settings store.
    ///
    /// Reloads the configuration when the store revision changed, feeds
    /// `SLCConfirmed` into the cycle, resets it once consumed, and publishes
    /// the mode status to `CEStatus`. Store errors are logged, the result is
    /// always produced.
    pub fn run_cycle(&mut self, store: &mut ParameterStore, inputs: &CycleInputs) -> CycleResult {
        let revision = store.revision();
        if self.revision != Some(revision) {
            self.config = PlannerConfig::from_store(store);
            self.revision = Some(revision);
            log::debug!("planner settings reloaded (revision {})", revision);
        }
        let config = self.config;

        let confirmed = status::speed_limit_confirmed(store);
        let result = if confirmed && !inputs.controls.speed_limit_confirmed {
            let mut confirmed_inputs = inputs.clone();
            confirmed_inputs.controls.speed_limit_confirmed = true;
            self.update(&config, &confirmed_inputs)
        } else {
            self.update(&config, inputs)
        };

        if result.cruise.confirmation_consumed && confirmed {
            if let Err(err) = status::clear_speed_limit_confirmation(store) {
                log::warn!("failed to reset {}: {}", status::SLC_CONFIRMED, err);
            }
        }
        if let Err(err) = status::publish_status(store, &result.decision) {
            log::warn!("failed to publish {}: {}", status::CE_STATUS, err);
        }

        result
    }

    /// Drop all cross-cycle state, keeping tables and configuration
    pub fn reset(&mut self) {
        self.follow.reset();
        self.mode.reset();
        self.cruise = CruiseTargetArbitrator::new();
    }
}
