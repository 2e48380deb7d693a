//! # Database Persistence Layer
//!
//! Optional Postgres persistence for analysis records via SQLx.
//!
//! The database layer is **optional**. When `DATABASE_URL` is set, every
//! scored upload is written to the `analyses` table and `/api/analyses`
//! serves recent records. When absent, the API runs in score-only mode:
//! uploads are analyzed and returned with `id: null`, and the listing
//! endpoint returns an empty set.
//!
//! Persistence failures never fail a request — records are created once at
//! upload time on a best-effort basis and are never mutated or deleted.

pub mod analyses;

use sqlx::postgres::{PgPool, PgPoolOptions};

/// Initialize the database connection pool and run migrations.
///
/// Returns `None` if `DATABASE_URL` is not set (score-only mode).
/// Returns `Err` if the URL is set but the connection or migration fails.
pub async fn init_pool() -> Result<Option<PgPool>, sqlx::Error> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!(
                "DATABASE_URL not set — running in score-only mode. \
                 Analyses will not be persisted."
            );
            return Ok(None);
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(&url)
        .await?;

    tracing::info!("Connected to PostgreSQL");

    // Run embedded migrations.
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(Some(pool))
}
