//! # Diagnostics Endpoints
//!
//! Root and hello greetings plus the `/test` database-connectivity check.
//! All three are unauthenticated plumbing for smoke tests and deploy checks.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// Simple greeting body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Greeting {
    pub message: String,
}

/// Database-connectivity diagnostic body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TestResponse {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub tables: Vec<String>,
}

/// Build the diagnostics router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/api/hello", get(hello))
        .route("/test", get(test_database))
}

/// GET / — Root greeting.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Greeting", body = Greeting)),
    tag = "diagnostics"
)]
pub async fn root() -> Json<Greeting> {
    Json(Greeting {
        message: "Hello from the Gapscan backend!".to_string(),
    })
}

/// GET /api/hello — API greeting.
#[utoipa::path(
    get,
    path = "/api/hello",
    responses((status = 200, description = "Greeting", body = Greeting)),
    tag = "diagnostics"
)]
pub async fn hello() -> Json<Greeting> {
    Json(Greeting {
        message: "Hello from the backend API!".to_string(),
    })
}

/// GET /test — Report whether the database is configured and reachable.
///
/// Always returns 200; the body describes the connectivity state. Checks the
/// configured pool with `SELECT 1` and lists the first 10 public tables.
#[utoipa::path(
    get,
    path = "/test",
    responses((status = 200, description = "Connectivity report", body = TestResponse)),
    tag = "diagnostics"
)]
pub async fn test_database(State(state): State<AppState>) -> Json<TestResponse> {
    let env_flag = |name: &str| {
        if std::env::var(name).is_ok() {
            "set".to_string()
        } else {
            "not set".to_string()
        }
    };

    let mut response = TestResponse {
        backend: "running".to_string(),
        database: "not configured".to_string(),
        database_url: env_flag("DATABASE_URL"),
        database_name: env_flag("DATABASE_NAME"),
        connection_status: "not connected".to_string(),
        tables: vec![],
    };

    let Some(pool) = &state.db_pool else {
        return Json(response);
    };

    match sqlx::query("SELECT 1").execute(pool).await {
        Ok(_) => {
            response.database = "connected".to_string();
            response.connection_status = "connected".to_string();
        }
        Err(e) => {
            // Keep the diagnostic short; char-wise to stay on a boundary.
            let msg: String = e.to_string().chars().take(50).collect();
            response.database = format!("error: {msg}");
            return Json(response);
        }
    }

    match crate::db::analyses::list_table_names(pool).await {
        Ok(tables) => response.tables = tables,
        Err(e) => {
            tracing::warn!(error = %e, "failed to list tables for diagnostics");
        }
    }

    Json(response)
}
