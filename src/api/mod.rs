//! REST API exposing the dispatch engine to service collaborators.
//!
//! Provides four endpoints:
//! - `GET /health` — liveness probe
//! - `GET /battery/status` — current battery configuration
//! - `PATCH /battery/config` — sparse configuration update
//! - `POST /optimize` — schedule a run over submitted readings

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::Router;
use axum::routing::{get, patch, post};

use crate::dispatch::DispatchEngine;

/// Application state shared across all request handlers.
///
/// The lock guards only configuration snapshots and patches; each optimize
/// request clones the engine under the lock and folds over its own copy,
/// so an update can never interleave with an in-flight run.
pub struct AppState {
    /// The shared dispatch engine.
    pub engine: Mutex<DispatchEngine>,
}

impl AppState {
    /// Wraps an engine for sharing across handlers.
    pub fn new(engine: DispatchEngine) -> Self {
        Self {
            engine: Mutex::new(engine),
        }
    }

    /// Locks the engine, absorbing poisoning.
    ///
    /// The guarded data is plain configuration values, valid even if a
    /// previous holder panicked.
    pub(crate) fn lock_engine(&self) -> MutexGuard<'_, DispatchEngine> {
        match self.engine.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/battery/status", get(handlers::battery_status))
        .route("/battery/config", patch(handlers::update_battery_config))
        .route("/optimize", post(handlers::optimize))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
