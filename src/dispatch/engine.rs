//! Dispatch engine: validated configuration ownership and run orchestration.

use crate::config::{BatteryConfig, BatteryConfigPatch, ConfigError};

use super::assembler;
use super::types::{BatteryState, ConsumptionReading, ScheduleEntry};

/// Fraction of capacity a fresh run starts from.
const INITIAL_SOC: f64 = 0.5;

/// Rule-based dispatch engine for one household battery.
///
/// The engine owns an immutable-per-run [`BatteryConfig`]: a run reads the
/// configuration it was started with, and [`DispatchEngine::update_config`]
/// takes `&mut self`, so an update can never interleave with an in-flight
/// run on the same instance. Services sharing one engine across requests
/// clone it per request and guard the shared copy with a lock held only
/// while snapshotting or patching the configuration.
#[derive(Debug, Clone)]
pub struct DispatchEngine {
    config: BatteryConfig,
}

impl DispatchEngine {
    /// Creates an engine after validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` if any parameter is out of range.
    pub fn new(config: BatteryConfig) -> Result<Self, ConfigError> {
        if let Some(e) = config.validate().into_iter().next() {
            return Err(e);
        }
        Ok(Self { config })
    }

    /// Returns the current battery configuration.
    pub fn config(&self) -> &BatteryConfig {
        &self.config
    }

    /// Applies a sparse patch, keeping unspecified fields.
    ///
    /// The patched configuration is validated before it is committed, so a
    /// rejected patch leaves the engine unchanged.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` if the patched result is invalid.
    pub fn update_config(&mut self, patch: &BatteryConfigPatch) -> Result<(), ConfigError> {
        let mut next = self.config.clone();
        patch.apply(&mut next);
        if let Some(e) = next.validate().into_iter().next() {
            return Err(e);
        }
        self.config = next;
        Ok(())
    }

    /// Returns the fixed starting state for a fresh run: 50% of capacity.
    pub fn initial_state(&self) -> BatteryState {
        BatteryState::new(self.config.capacity_kwh * INITIAL_SOC)
    }

    /// Schedules one run over `readings` from a fresh 50% state.
    ///
    /// A strict left fold: each entry's level feeds the next sample, in
    /// input order. Empty input yields empty output. The run state is
    /// discarded; use [`DispatchEngine::optimize_from`] to persist state
    /// across successive runs.
    pub fn optimize(&self, readings: &[ConsumptionReading]) -> Vec<ScheduleEntry> {
        self.optimize_from(self.initial_state(), readings).0
    }

    /// Schedules one run starting from an injected battery state.
    ///
    /// The injected level is clamped into `[0, capacity]` before the fold,
    /// which keeps a state carried over from a run under a different
    /// configuration physically meaningful. Returns the schedule together
    /// with the final (unrounded) state for the caller to carry forward.
    pub fn optimize_from(
        &self,
        state: BatteryState,
        readings: &[ConsumptionReading],
    ) -> (Vec<ScheduleEntry>, BatteryState) {
        let mut state = BatteryState::new(state.level_kwh.clamp(0.0, self.config.capacity_kwh));

        let mut schedule = Vec::with_capacity(readings.len());
        for reading in readings {
            schedule.push(assembler::step(
                &mut state,
                &self.config,
                reading.consumption_kwh,
            ));
        }
        (schedule, state)
    }
}
