// Module: http
// HTTP/JSON API surface

pub mod error;
pub mod health;
pub mod middleware;
pub mod visits;

use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderValue,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

use visitd_core::{config::RuntimeMode, storage::VisitStore};

use crate::observability::{metrics_middleware, Metrics};

pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn VisitStore>,
    pub metrics: Arc<Metrics>,
    pub allowed_origins: Arc<[String]>,
    pub mode: RuntimeMode,
}

impl AppState {
    pub fn new(
        store: Arc<dyn VisitStore>,
        metrics: Arc<Metrics>,
        allowed_origins: Vec<String>,
        mode: RuntimeMode,
    ) -> Self {
        Self {
            store,
            metrics,
            allowed_origins: allowed_origins.into(),
            mode,
        }
    }
}

/// Create the HTTP router with all routes and the middleware chain.
///
/// Layer order around the visit handler, outermost first: metrics, request
/// logging, CORS, and (production mode only) the origin check. Health and
/// metrics-exposition endpoints sit outside the chain.
pub fn create_router(state: AppState) -> Router {
    let mut api = Router::new().route(
        "/api/count",
        get(visits::get_count).post(visits::increment),
    );

    if state.mode == RuntimeMode::Production {
        api = api.layer(from_fn_with_state(
            state.clone(),
            middleware::origin_check_layer,
        ));
    }

    let api = api
        .layer(cors_layer(&state))
        .layer(from_fn(middleware::logging_layer))
        .layer(from_fn_with_state(
            state.clone(),
            metrics_middleware::metrics_layer,
        ));

    Router::new()
        .merge(api)
        .merge(health::create_health_router())
        .route("/metrics", get(serve_metrics))
        .with_state(state)
}

/// Build the CORS layer for the configured mode.
///
/// Production echoes only configured origins; development allows any.
fn cors_layer(state: &AppState) -> CorsLayer {
    match state.mode {
        RuntimeMode::Production => {
            let origins: Vec<HeaderValue> = state
                .allowed_origins
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!(origin = %origin, "Skipping unparsable allowed origin");
                        None
                    }
                })
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
        RuntimeMode::Development => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    }
}

/// GET /metrics, consumed by an external scrape collector.
async fn serve_metrics(State(state): State<AppState>) -> String {
    state.metrics.gather()
}
