//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gapscan — Compliance Gap Analyzer API",
        version = "0.2.1",
        description = "Upload a document and score it against six fixed compliance \
            keyword clusters (privacy, security, governance, retention, training, \
            vendor). Returns per-cluster coverage fractions, an overall score, gap \
            messages, and recommendations. Analyses are persisted to Postgres when \
            `DATABASE_URL` is configured; otherwise the service runs score-only.\n\n\
            No authentication: all endpoints are open.",
        license(name = "Apache-2.0")
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server"),
    ),
    paths(
        crate::routes::analyze::analyze_document,
        crate::routes::analyses::list_analyses,
        crate::routes::diagnostics::root,
        crate::routes::diagnostics::hello,
        crate::routes::diagnostics::test_database,
    ),
    components(schemas(
        crate::routes::analyze::AnalyzeResponse,
        crate::routes::analyses::AnalysisSummary,
        crate::routes::analyses::ListAnalysesResponse,
        crate::routes::diagnostics::Greeting,
        crate::routes::diagnostics::TestResponse,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        gapscan_core::Cluster,
        gapscan_core::KeywordCoverage,
        gapscan_core::CoverageReport,
    )),
    tags(
        (name = "analysis", description = "Document upload, scoring, and history"),
        (name = "diagnostics", description = "Greetings and connectivity checks"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_spec))
}

/// GET /openapi.json — Serve the assembled OpenAPI document.
async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_contains_all_paths() {
        let spec = ApiDoc::openapi();
        let paths = &spec.paths.paths;
        for expected in ["/api/analyze", "/api/analyses", "/", "/api/hello", "/test"] {
            assert!(paths.contains_key(expected), "missing path {expected}");
        }
    }

    #[test]
    fn spec_serializes_to_json() {
        let json = serde_json::to_string(&ApiDoc::openapi()).unwrap();
        assert!(json.contains("Gapscan"));
        assert!(json.contains("AnalyzeResponse"));
    }
}
