//! Fixed-tick planning loop.
//!
//! Pulls a frame from the vehicle adapter, applies pending settings writes,
//! runs one planner cycle against the settings store, publishes the plan
//! and hands the result back to the adapter.

use std::time::Duration;

use adaptive_long_core::mode::ModeDecision;
use adaptive_long_core::parameters::ParameterStore;
use adaptive_long_core::telemetry::{PlanMessage, PlanSink};
use adaptive_long_core::Planner;
use tokio::time::{interval, MissedTickBehavior};

use crate::adapter::VehicleAdapter;
use crate::error::SimError;
use crate::scenario::{apply_setting, Scenario};
use crate::summary::RunSummary;
use crate::time::TimeMode;

/// Drives a [`Planner`] from a [`VehicleAdapter`].
pub struct CycleRunner {
    planner: Planner,
    store: ParameterStore,
    tick: Duration,
    time_mode: TimeMode,
    max_cycles: Option<usize>,
}

impl CycleRunner {
    pub fn new(planner: Planner, store: ParameterStore, tick: Duration) -> Self {
        Self {
            planner,
            store,
            tick,
            time_mode: TimeMode::default(),
            max_cycles: None,
        }
    }

    /// Runner with the scenario's tables, settings and tick.
    pub fn from_scenario(scenario: &Scenario) -> Result<Self, SimError> {
        let planner = Planner::with_tables(scenario.accel_tables()?)?;
        let store = scenario.build_store()?;
        Ok(Self::new(
            planner,
            store,
            Duration::from_millis(scenario.tick_ms),
        ))
    }

    /// Set the pacing mode.
    pub fn set_time_mode(&mut self, mode: TimeMode) {
        self.time_mode = mode;
    }

    /// Stop after `cycles` cycles even if the adapter has more frames.
    pub fn set_max_cycles(&mut self, cycles: usize) {
        self.max_cycles = Some(cycles);
    }

    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    pub fn store(&self) -> &ParameterStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ParameterStore {
        &mut self.store
    }

    /// Run until the adapter runs out of frames.
    pub async fn run<V>(
        &mut self,
        vehicle: &mut V,
        sink: &mut dyn PlanSink,
    ) -> Result<RunSummary, SimError>
    where
        V: VehicleAdapter + ?Sized,
    {
        let mut summary = RunSummary::new(vehicle.name());
        let mut pacing = self.time_mode.period(self.tick).map(|period| {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker
        });
        let mut previous = ModeDecision::INACTIVE;

        tracing::info!(
            adapter = vehicle.name(),
            tick_ms = self.tick.as_millis() as u64,
            mode = ?self.time_mode,
            "cycle runner started"
        );

        while self.max_cycles.map_or(true, |max| summary.cycles < max) {
            if let Some(ticker) = pacing.as_mut() {
                ticker.tick().await;
            } else {
                tokio::task::yield_now().await;
            }

            let Some(frame) = vehicle.sense().await? else {
                break;
            };
            for (name, value) in &frame.settings {
                apply_setting(&mut self.store, name, *value)?;
            }

            let result = self.planner.run_cycle(&mut self.store, &frame.inputs);
            let is_metric = self.planner.config().general.is_metric;
            sink.publish(&PlanMessage::from_result(&result, is_metric));

            if result.decision != previous {
                tracing::info!(
                    t_s = vehicle.sim_time_us() as f64 / 1e6,
                    from = ?previous.cause,
                    to = ?result.decision.cause,
                    "conditional mode changed"
                );
                previous = result.decision;
            }
            tracing::trace!(
                v_ego = frame.inputs.ego.velocity,
                target = result.cruise_target(),
                max_accel = result.max_accel(),
                min_accel = result.min_accel(),
                "cycle"
            );

            vehicle.actuate(&result).await?;
            summary.record(&frame.inputs, &result, vehicle.lead_gap());
        }

        summary.sim_time_s = (vehicle.sim_time_us() as f64 / 1e6) as f32;
        tracing::info!(
            cycles = summary.cycles,
            activations = summary.mode_activations,
            collided = summary.collided,
            "cycle runner finished"
        );
        Ok(summary)
    }
}
