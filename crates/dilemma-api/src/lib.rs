//! # dilemma-api - Axum API Services
//!
//! Exposes the two remote contracts of the dilemma stack over HTTP/JSON.
//! Handlers are thin: they decode a body, call a service facade in
//! [`services`], and map the result.
//!
//! ## API Surface
//!
//! | Prefix             | Module                  | Contract  |
//! |--------------------|-------------------------|-----------|
//! | `/v1/decisions/*`  | [`routes::decisions`]   | Decisions |
//! | `/v1/appeals`      | [`routes::appeals`]     | Appeals   |
//! | `/v1/cases`        | [`routes::cases`]       | Listing   |
//!
//! `/health/*` and `/metrics` are mounted outside the metrics middleware and
//! do not count toward request totals.
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```
//!
//! ## OpenAPI
//!
//! Generated via utoipa derive macros and served at `/openapi.json`.

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod services;
pub mod state;

use axum::middleware::from_fn;
use axum::routing::get;
use axum::{Extension, Router};
use tower_http::trace::TraceLayer;

use crate::middleware::metrics::ApiMetrics;

pub use error::AppError;
pub use state::{AppConfig, AppState};

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    app_with_metrics(state, ApiMetrics::new())
}

/// Same as [`app`], recording into a caller-supplied metrics handle.
pub fn app_with_metrics(state: AppState, metrics: ApiMetrics) -> Router {
    let api = Router::new()
        .merge(routes::decisions::router())
        .merge(routes::appeals::router())
        .merge(routes::cases::router())
        .merge(openapi::router())
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(metrics.clone()))
        .with_state(state);

    let operational = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .route("/metrics", get(middleware::metrics::metrics_handler))
        .layer(Extension(metrics));

    Router::new().merge(operational).merge(api)
}

/// Liveness probe - always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe - the registry is built before the router exists.
async fn readiness() -> &'static str {
    "ready"
}
