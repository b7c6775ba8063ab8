//! API request/response types and loose-record conversion.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dispatch::{ConsumptionReading, DispatchError, ScheduleEntry};

/// Liveness probe response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Fixed `"healthy"` marker.
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
}

/// Optimization request: one household's ordered reading sequence.
///
/// Readings arrive as loose JSON records so a malformed field can be
/// reported as a conversion error rather than a generic decode failure.
#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    /// Household the readings belong to.
    pub household_id: u64,
    /// Ordered consumption records.
    pub household_data: Vec<Value>,
}

/// Optimization response: one schedule entry per submitted reading.
#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    /// Echo of the requested household.
    pub household_id: u64,
    /// The assembled schedule, in input order.
    pub schedule: Vec<ScheduleEntry>,
    /// Human-readable outcome summary.
    pub message: String,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error description.
    pub error: String,
}

/// Converts a loose JSON record into a typed reading.
///
/// `consumption_kwh` is the only optional field: absent or `null` means
/// 0.0. A present-but-non-numeric consumption, or a malformed
/// `household_id`/`timestamp`, is a conversion error surfaced unchanged
/// to the caller.
pub fn reading_from_value(value: &Value) -> Result<ConsumptionReading, DispatchError> {
    let record = value.as_object().ok_or(DispatchError::Conversion {
        field: "household_data",
        message: format!("expected an object, got {value}"),
    })?;

    let household_id = record
        .get("household_id")
        .and_then(Value::as_u64)
        .ok_or_else(|| DispatchError::Conversion {
            field: "household_id",
            message: "expected a non-negative integer".to_string(),
        })?;

    let timestamp = record
        .get("timestamp")
        .and_then(Value::as_i64)
        .ok_or_else(|| DispatchError::Conversion {
            field: "timestamp",
            message: "expected epoch seconds as an integer".to_string(),
        })?;

    let consumption_kwh = match record.get("consumption_kwh") {
        None | Some(Value::Null) => 0.0,
        Some(v) => v.as_f64().ok_or_else(|| DispatchError::Conversion {
            field: "consumption_kwh",
            message: format!("expected a number, got {v}"),
        })?,
    };

    Ok(ConsumptionReading {
        household_id,
        timestamp,
        consumption_kwh,
    })
}
