//! Axum middleware for collecting HTTP request metrics.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use crate::http::AppState;

/// Middleware that records request count and duration per (method, endpoint).
///
/// The observation happens after the downstream call returns, so it also
/// covers responses short-circuited by inner layers.
pub async fn metrics_layer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let endpoint = request.uri().path().to_string();

    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed().as_secs_f64();

    state
        .metrics
        .http_requests_total
        .with_label_values(&[&method, &endpoint])
        .inc();
    state
        .metrics
        .http_request_duration_seconds
        .with_label_values(&[&method, &endpoint])
        .observe(duration);

    response
}
