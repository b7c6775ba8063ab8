//! Core dispatch types: readings, battery state, schedule entries, errors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// One consumption sample supplied by the metering boundary.
///
/// The engine trusts input order and never re-sorts by timestamp. A record
/// with no consumption value deserializes with `consumption_kwh = 0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionReading {
    /// Household identifier.
    pub household_id: u64,
    /// Sample time as epoch seconds. Ordering significance only.
    pub timestamp: i64,
    /// Consumed energy for the sample interval (kWh).
    #[serde(default)]
    pub consumption_kwh: f64,
}

/// Battery state of charge carried across one scheduling run.
///
/// Created fresh per run (50% of capacity by default), advanced once per
/// processed reading, and discarded at end of run unless the caller opts
/// into persistence via explicit state injection. The level carried between
/// samples is the unrounded clamped value, so display rounding never
/// compounds across a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryState {
    /// Stored energy (kWh), bounded to `[0, capacity]` by the assembler.
    pub level_kwh: f64,
}

impl BatteryState {
    /// Creates a state at the given level.
    pub fn new(level_kwh: f64) -> Self {
        Self { level_kwh }
    }
}

/// One output record of a scheduling run, produced 1:1 with input readings.
///
/// `charge_kw` and `discharge_kw` are never both nonzero. All three computed
/// fields are rounded to 3 decimals; `consumption_kwh` echoes the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Energy routed into the battery this sample (>= 0, 3 decimals).
    pub charge_kw: f64,
    /// Energy drawn from the battery this sample (>= 0, 3 decimals).
    pub discharge_kw: f64,
    /// State of charge after this sample (3 decimals, in `[0, capacity]`).
    pub battery_level_kwh: f64,
    /// Echo of the input consumption value.
    pub consumption_kwh: f64,
}

impl fmt::Display for ScheduleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cons={:>6.3} kWh | charge={:>6.3}  discharge={:>6.3} | level={:>8.3} kWh",
            self.consumption_kwh, self.charge_kw, self.discharge_kw, self.battery_level_kwh,
        )
    }
}

/// Failures surfaced by the dispatch boundary.
///
/// Conversion errors are caller input defects (non-numeric consumption,
/// malformed timestamp); configuration errors are rejected parameter sets.
/// Both are surfaced immediately and never retried — the engine is
/// deterministic given its inputs.
#[derive(Debug, Clone)]
pub enum DispatchError {
    /// A record field could not be converted to its expected type.
    Conversion {
        /// Name of the offending field.
        field: &'static str,
        /// What was found instead.
        message: String,
    },
    /// The battery configuration failed validation.
    Config(ConfigError),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conversion { field, message } => {
                write!(f, "conversion error: {field} — {message}")
            }
            Self::Config(e) => write!(f, "{e}"),
        }
    }
}

impl From<ConfigError> for DispatchError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
