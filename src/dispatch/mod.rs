//! Battery dispatch core: decision policy, schedule assembly, and the
//! run engine that folds a reading sequence into a schedule.

/// Per-sample charge/discharge amount computation and state update.
pub mod assembler;
pub mod engine;
/// Threshold-based regime classification.
pub mod policy;
pub mod types;

pub use engine::DispatchEngine;
pub use policy::Regime;
pub use types::{BatteryState, ConsumptionReading, DispatchError, ScheduleEntry};
