//! Health check endpoints
//!
//! Liveness and readiness probes for monitoring.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use tracing::error;

use crate::http::AppState;

/// Health check router
pub fn create_health_router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}

/// Liveness check (always returns OK if the server is running)
pub async fn healthz() -> impl IntoResponse {
    "OK"
}

/// Readiness check: additionally pings storage.
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "OK"),
        Err(e) => {
            error!("Readiness check failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "storage unreachable")
        }
    }
}
