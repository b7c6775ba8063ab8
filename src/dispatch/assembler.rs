//! Schedule assembly: per-sample amount computation and state update.

use crate::config::BatteryConfig;

use super::policy::{self, Regime};
use super::types::{BatteryState, ScheduleEntry};

/// Rounds to 3 decimal places for emitted schedule fields.
pub(crate) fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

/// Advances the battery state by one reading and emits its schedule entry.
///
/// Amounts are clipped to the rate limit scaled by the sample interval and
/// to the available headroom (charge) or stored energy (discharge).
/// Efficiency loss applies on the charge path only; discharge is lossless.
/// The new level is clamped to `[0, capacity]` regardless of regime, and
/// the state keeps the unrounded clamped value while the entry carries the
/// rounded one.
pub fn step(
    state: &mut BatteryState,
    config: &BatteryConfig,
    consumption_kwh: f64,
) -> ScheduleEntry {
    let level = state.level_kwh;

    let (charge_kw, discharge_kw, new_level) = match policy::classify(consumption_kwh) {
        Regime::Charge => {
            let amount = (config.max_charge_kw * config.interval_fraction)
                .min(config.capacity_kwh - level);
            (amount, 0.0, level + amount * config.efficiency)
        }
        Regime::Discharge => {
            let amount = (config.max_discharge_kw * config.interval_fraction).min(level);
            (0.0, amount, level - amount)
        }
        Regime::Hold => (0.0, 0.0, level),
    };

    // Safety bound against floating-point drift
    let clamped = new_level.clamp(0.0, config.capacity_kwh);
    state.level_kwh = clamped;

    ScheduleEntry {
        charge_kw: round3(charge_kw),
        discharge_kw: round3(discharge_kw),
        battery_level_kwh: round3(clamped),
        consumption_kwh,
    }
}
