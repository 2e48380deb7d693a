//! # gapscan-api — Axum API for the Compliance Gap Analyzer
//!
//! Thin HTTP plumbing around the pure scorer in `gapscan-core`.
//!
//! ## API Surface
//!
//! | Route                | Module                   | Behavior                          |
//! |----------------------|--------------------------|-----------------------------------|
//! | `POST /api/analyze`  | [`routes::analyze`]      | Upload, decode, score, persist    |
//! | `GET /api/analyses`  | [`routes::analyses`]     | Recent persisted analyses         |
//! | `GET /`              | [`routes::diagnostics`]  | Root greeting                     |
//! | `GET /api/hello`     | [`routes::diagnostics`]  | API greeting                      |
//! | `GET /test`          | [`routes::diagnostics`]  | Database connectivity diagnostic  |
//! | `GET /openapi.json`  | [`openapi`]              | OpenAPI spec                      |
//! | `GET /metrics`       | [`middleware::metrics`]  | Prometheus scrape                 |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → CorsLayer → MetricsMiddleware → Handler
//! ```
//!
//! No authentication: every endpoint is open by design.

pub mod db;
pub mod error;
pub mod ingest;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::{Extension, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// Check if metrics are enabled via the `GAPSCAN_METRICS_ENABLED` env var.
/// Defaults to `true` when the variable is absent or set to anything other
/// than `"false"`.
fn metrics_enabled() -> bool {
    std::env::var("GAPSCAN_METRICS_ENABLED")
        .map(|v| v.to_lowercase() != "false")
        .unwrap_or(true)
}

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let metrics = ApiMetrics::new();
    let metrics_on = metrics_enabled();

    // Body size limit: 10 MiB. Uploads above this are rejected before the
    // handler runs; the default 2 MiB axum limit is too tight for documents.
    let mut api = Router::new()
        .merge(routes::analyze::router())
        .merge(routes::analyses::router())
        .merge(routes::diagnostics::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024));

    if metrics_on {
        api = api
            .layer(from_fn(middleware::metrics::metrics_middleware))
            .layer(Extension(metrics.clone()));
    }

    // A browser frontend on another origin consumes this API, so CORS is
    // wide open.
    let mut router = api
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    if metrics_on {
        router = router
            .route("/metrics", axum::routing::get(prometheus_metrics))
            .layer(Extension(metrics));
    }

    router.with_state(state)
}

/// GET /metrics — Prometheus metrics scrape endpoint.
async fn prometheus_metrics(Extension(metrics): Extension<ApiMetrics>) -> impl IntoResponse {
    match metrics.gather_and_encode() {
        Ok(body) => (
            StatusCode::OK,
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode Prometheus metrics: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
        }
    }
}
