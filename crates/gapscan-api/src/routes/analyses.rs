//! # Recent Analyses Listing
//!
//! Read-only listing of persisted analysis records. Database absence or
//! failure degrades to an empty listing — this endpoint never errors.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

/// Query parameters for the listing.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListParams {
    /// Maximum number of records to return (default 10, capped at 100).
    pub limit: Option<i64>,
}

/// One listed analysis.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalysisSummary {
    pub id: String,
    pub title: String,
    pub filename: String,
    pub size: i64,
    /// ISO-8601 UTC timestamp with trailing `Z`.
    pub uploaded_at: String,
    pub coverage_score: f64,
}

/// Listing response envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListAnalysesResponse {
    pub items: Vec<AnalysisSummary>,
}

/// Build the analyses router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/analyses", get(list_analyses))
}

/// GET /api/analyses — List the most recent persisted analyses.
#[utoipa::path(
    get,
    path = "/api/analyses",
    params(ListParams),
    responses(
        (status = 200, description = "Recent analyses, newest first; empty when persistence is unconfigured", body = ListAnalysesResponse),
    ),
    tag = "analysis"
)]
pub async fn list_analyses(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<ListAnalysesResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let Some(pool) = &state.db_pool else {
        return Json(ListAnalysesResponse { items: vec![] });
    };

    let rows = match crate::db::analyses::list_recent(pool, limit).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(error = %e, "failed to list analyses; returning empty set");
            return Json(ListAnalysesResponse { items: vec![] });
        }
    };

    let items = rows
        .into_iter()
        .map(|row| AnalysisSummary {
            id: row.id.to_string(),
            title: row.title,
            filename: row.filename,
            size: row.size,
            uploaded_at: row
                .uploaded_at
                .to_rfc3339_opts(SecondsFormat::Micros, true),
            coverage_score: row.coverage_score,
        })
        .collect();

    Json(ListAnalysesResponse { items })
}
