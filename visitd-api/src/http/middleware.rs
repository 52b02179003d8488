// HTTP middleware

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;
use tracing::{info, warn};

use super::AppState;

/// Request logging middleware.
///
/// Logs method, URI, status, and elapsed wall-clock time after the
/// downstream handler returns. Never short-circuits.
pub async fn logging_layer(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let start = Instant::now();
    let response = next.run(request).await;

    info!(
        method = %method,
        uri = %uri,
        status = response.status().as_u16(),
        duration = ?start.elapsed(),
        "request handled"
    );

    response
}

/// Origin allow-list enforcement, active only in production mode.
///
/// The request Origin header must exactly match one of the configured
/// origins; there is no fallback to the Host header. A missing header, an
/// unlisted origin, or an empty allow-list rejects the request with 403
/// without invoking the downstream handler. On a match the response carries
/// `Access-Control-Allow-Origin` set to the matched origin.
pub async fn origin_check_layer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if state.allowed_origins.is_empty() {
        warn!("Origin allow-list is empty, rejecting request");
        return (StatusCode::FORBIDDEN, "Forbidden").into_response();
    }

    let origin = match request
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
    {
        Some(o) if state.allowed_origins.iter().any(|allowed| allowed.as_str() == o) => {
            o.to_owned()
        }
        _ => return (StatusCode::FORBIDDEN, "Forbidden").into_response(),
    };

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&origin) {
        response
            .headers_mut()
            .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
    }

    response
}
