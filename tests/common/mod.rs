//! Shared test fixtures for integration tests.

use bess_dispatch::config::BatteryConfig;
use bess_dispatch::dispatch::{ConsumptionReading, DispatchEngine};

/// Default battery configuration (10 kWh, 3 kW rates, 95%, 15-minute samples).
pub fn default_battery() -> BatteryConfig {
    BatteryConfig::default()
}

/// Engine over the default battery configuration.
pub fn default_engine() -> DispatchEngine {
    DispatchEngine::new(default_battery()).expect("default config should be valid")
}

/// Builds an ordered reading sequence from consumption values, with
/// 15-minute timestamp spacing.
pub fn readings_from(values: &[f64]) -> Vec<ConsumptionReading> {
    values
        .iter()
        .enumerate()
        .map(|(i, &consumption_kwh)| ConsumptionReading {
            household_id: 1,
            timestamp: i as i64 * 900,
            consumption_kwh,
        })
        .collect()
}
