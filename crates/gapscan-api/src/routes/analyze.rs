//! # Document Analysis API
//!
//! Handles the upload-and-score flow: read the multipart upload, decode the
//! bytes best-effort, run the coverage scorer, persist the record when a
//! database is configured, and return the full report.
//!
//! Downstream of a successfully read upload this handler cannot fail —
//! decode and persistence failures are absorbed, per the service contract.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::routing::post;
use axum::{Extension, Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use gapscan_core::{analyze, KeywordCoverage};

use crate::db::analyses::AnalysisRecord;
use crate::error::AppError;
use crate::ingest::decode_text;
use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

/// Two fixed encouragement sentences appended to every recommendation list.
const ENCOURAGEMENTS: [&str; 2] = [
    "Celebrate the wins: compliance keeps users safe and builds trust.",
    "We smooth the annoying bits with templates, checklists and automation.",
];

/// Fallback values when the multipart part omits metadata.
const DEFAULT_FILENAME: &str = "upload";
const DEFAULT_MIME_TYPE: &str = "text/plain";

/// Response for a scored upload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeResponse {
    /// Persisted record id, or null when persistence is unconfigured or failed.
    pub id: Option<String>,
    pub filename: String,
    pub size: usize,
    pub mime_type: String,
    /// ISO-8601 UTC timestamp with trailing `Z`.
    pub uploaded_at: String,
    pub summary: String,
    pub coverage_score: f64,
    pub keyword_coverage: KeywordCoverage,
    pub gaps: Vec<String>,
    /// Advisory sentences, then the raw gap strings, then two encouragement
    /// sentences. A fully-missing cluster appears twice (advisory + gap);
    /// this duplication is part of the contract and is not deduplicated.
    pub recommendations: Vec<String>,
}

/// The `file` part of the multipart upload, plus the optional `doc_title`.
struct Upload {
    bytes: Vec<u8>,
    filename: String,
    mime_type: String,
    title: Option<String>,
}

/// Build the analyze router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/analyze", post(analyze_document))
}

/// Pull the file part and optional title out of the multipart stream.
///
/// Any failure to read the stream, or a missing `file` part, collapses into
/// the one fixed client error.
async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    let mut file: Option<(Vec<u8>, String, String)> = None;
    let mut title: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::unreadable_upload())?
    {
        match field.name() {
            Some("file") => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| DEFAULT_FILENAME.to_string());
                let mime_type = field
                    .content_type()
                    .map(str::to_string)
                    .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| AppError::unreadable_upload())?;
                file = Some((bytes.to_vec(), filename, mime_type));
            }
            Some("doc_title") => {
                let text = field.text().await.unwrap_or_default();
                if !text.is_empty() {
                    title = Some(text);
                }
            }
            _ => {}
        }
    }

    let (bytes, filename, mime_type) = file.ok_or_else(AppError::unreadable_upload)?;
    Ok(Upload {
        bytes,
        filename,
        mime_type,
        title,
    })
}

/// POST /api/analyze — Upload a document and score its compliance coverage.
#[utoipa::path(
    post,
    path = "/api/analyze",
    request_body(content = String, content_type = "multipart/form-data", description = "Required `file` part, optional `doc_title` text part"),
    responses(
        (status = 200, description = "Coverage report", body = AnalyzeResponse),
        (status = 400, description = "Upload could not be read", body = crate::error::ErrorBody),
    ),
    tag = "analysis"
)]
pub async fn analyze_document(
    State(state): State<AppState>,
    metrics: Option<Extension<ApiMetrics>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    // Any rejection (wrong content type, malformed framing) is the same
    // client-visible failure as an unreadable file part.
    let multipart = multipart.map_err(|_| AppError::unreadable_upload())?;
    let upload = read_upload(multipart).await?;

    let text = decode_text(&upload.bytes);
    let report = analyze(&text);

    if let Some(Extension(metrics)) = metrics {
        metrics.documents_analyzed().inc();
    }

    // Caller-facing recommendations: advisory sentences, then the raw gaps,
    // then the two encouragements.
    let mut recommendations = report.recommendations.clone();
    recommendations.extend(report.gaps.iter().cloned());
    recommendations.extend(ENCOURAGEMENTS.iter().map(|s| s.to_string()));

    let uploaded_at = Utc::now();
    let size = upload.bytes.len();

    // Best-effort persistence: failure (or no configured database) means the
    // response simply carries no id.
    let mut id = None;
    if let Some(pool) = &state.db_pool {
        let record_id = Uuid::new_v4();
        let mut stored_report = serde_json::json!({
            "coverage_score": report.coverage_score,
            "keyword_coverage": report.keyword_coverage,
            "gaps": &report.gaps,
            "summary": &report.summary,
        });
        stored_report["recommendations"] = serde_json::json!(&recommendations);

        let record = AnalysisRecord {
            id: record_id,
            title: upload.title.clone().unwrap_or_else(|| upload.filename.clone()),
            filename: upload.filename.clone(),
            size: size as i64,
            mime_type: upload.mime_type.clone(),
            coverage_score: report.coverage_score,
            report: stored_report,
            uploaded_at,
        };

        match crate::db::analyses::insert(pool, &record).await {
            Ok(()) => id = Some(record_id.to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to persist analysis; responding without id");
            }
        }
    }

    Ok(Json(AnalyzeResponse {
        id,
        filename: upload.filename,
        size,
        mime_type: upload.mime_type,
        uploaded_at: uploaded_at.to_rfc3339_opts(SecondsFormat::Micros, true),
        summary: report.summary,
        coverage_score: report.coverage_score,
        keyword_coverage: report.keyword_coverage,
        gaps: report.gaps,
        recommendations,
    }))
}
