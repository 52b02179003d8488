//! Visit counter endpoints
//!
//! A pure translation layer: HTTP verb in, storage operation out, storage
//! result back to a JSON response.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use super::{AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct IncrementResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct VisitCountResponse {
    pub visits: i64,
}

/// POST /api/count
///
/// Records one visit stamped with the current wall-clock time.
pub async fn increment(State(state): State<AppState>) -> AppResult<Json<IncrementResponse>> {
    state.store.increment_visit(Utc::now()).await?;

    info!("Visit count incremented");
    Ok(Json(IncrementResponse {
        message: "Visit count incremented",
    }))
}

/// GET /api/count
///
/// The count is recomputed on every read; nothing is cached.
pub async fn get_count(State(state): State<AppState>) -> AppResult<Json<VisitCountResponse>> {
    let visits = state.store.visit_count().await?;

    Ok(Json(VisitCountResponse { visits }))
}
