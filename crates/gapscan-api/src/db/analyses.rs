//! Analysis record persistence operations.
//!
//! All functions take a `&PgPool` and operate on the `analyses` table.
//! Callers swallow failures: an insert error means the response carries no
//! id, a list error means an empty listing.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// A persisted analysis: upload metadata plus the full coverage report.
///
/// The id is assigned by the caller at persistence time (uuid v4). Records
/// are immutable once written.
#[derive(Debug, Clone)]
pub struct AnalysisRecord {
    pub id: Uuid,
    /// Display title: the submitted `doc_title` or the filename.
    pub title: String,
    pub filename: String,
    pub size: i64,
    pub mime_type: String,
    pub coverage_score: f64,
    /// Full report as returned to the client (including the concatenated
    /// recommendation list).
    pub report: serde_json::Value,
    pub uploaded_at: DateTime<Utc>,
}

/// Row shape for the recent-analyses listing.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AnalysisSummaryRow {
    pub id: Uuid,
    pub title: String,
    pub filename: String,
    pub size: i64,
    pub coverage_score: f64,
    pub uploaded_at: DateTime<Utc>,
}

/// Insert a new analysis record.
pub async fn insert(pool: &PgPool, record: &AnalysisRecord) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO analyses (id, title, filename, size, mime_type, coverage_score, report, uploaded_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(record.id)
    .bind(&record.title)
    .bind(&record.filename)
    .bind(record.size)
    .bind(&record.mime_type)
    .bind(record.coverage_score)
    .bind(&record.report)
    .bind(record.uploaded_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// List the most recent analyses, newest first.
pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<AnalysisSummaryRow>, sqlx::Error> {
    sqlx::query_as::<_, AnalysisSummaryRow>(
        "SELECT id, title, filename, size, coverage_score, uploaded_at
         FROM analyses ORDER BY uploaded_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// First page of user table names, for the `/test` diagnostic endpoint.
pub async fn list_table_names(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name FROM information_schema.tables
         WHERE table_schema = 'public' ORDER BY table_name LIMIT 10",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(name,)| name).collect())
}
