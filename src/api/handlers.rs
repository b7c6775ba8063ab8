//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{
    ErrorResponse, HealthResponse, OptimizeRequest, OptimizeResponse, reading_from_value,
};
use crate::config::{BatteryConfig, BatteryConfigPatch};
use crate::dispatch::ConsumptionReading;

/// Liveness probe.
///
/// `GET /health` → 200 + `HealthResponse` JSON
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "bess-dispatch",
    })
}

/// Returns the current battery configuration.
///
/// `GET /battery/status` → 200 + `BatteryConfig` JSON
pub async fn battery_status(State(state): State<Arc<AppState>>) -> Json<BatteryConfig> {
    let config = state.lock_engine().config().clone();
    Json(config)
}

/// Applies a sparse configuration patch; unspecified fields keep priors.
///
/// `PATCH /battery/config` → 200 + updated `BatteryConfig` JSON
/// Invalid patched result → 422 + `ErrorResponse`, prior config kept.
pub async fn update_battery_config(
    State(state): State<Arc<AppState>>,
    Json(patch): Json<BatteryConfigPatch>,
) -> impl IntoResponse {
    let mut engine = state.lock_engine();
    match engine.update_config(&patch) {
        Ok(()) => Ok(Json(engine.config().clone())),
        Err(e) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}

/// Schedules a run over the submitted readings.
///
/// `POST /optimize` → 200 + `OptimizeResponse` JSON
/// Malformed record field → 400 + `ErrorResponse`
///
/// The engine is cloned under the lock, so the run sees one consistent
/// configuration snapshot even if a patch lands concurrently.
pub async fn optimize(
    State(state): State<Arc<AppState>>,
    Json(request): Json<OptimizeRequest>,
) -> impl IntoResponse {
    let readings: Result<Vec<ConsumptionReading>, _> = request
        .household_data
        .iter()
        .map(reading_from_value)
        .collect();

    let readings = match readings {
        Ok(r) => r,
        Err(e) => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ));
        }
    };

    let engine = state.lock_engine().clone();
    let schedule = engine.optimize(&readings);

    let message = if schedule.is_empty() {
        "no readings provided".to_string()
    } else {
        format!("optimization completed for {} time slots", schedule.len())
    };

    Ok(Json(OptimizeResponse {
        household_id: request.household_id,
        schedule,
        message,
    }))
}
