//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers via
//! the `State` extractor.
//!
//! AppState is intentionally thin: the scorer itself is a pure function and
//! holds no state, so the only shared resources are the configuration and
//! the optional Postgres pool. When the pool is `None` the service runs in
//! score-only mode — analyses are returned but never persisted.

use sqlx::PgPool;

/// Runtime configuration, built from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port to bind (env `PORT`, default 8000).
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { port: 8000 }
    }
}

impl AppConfig {
    /// Build configuration from environment variables.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);
        Self { port }
    }
}

/// Shared application state, cheap to clone into each handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    /// Optional Postgres pool. `None` means persistence is not configured;
    /// analyses are still scored and returned, just not stored.
    pub db_pool: Option<PgPool>,
}

impl AppState {
    /// State with default config and no database (used by tests).
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            db_pool: None,
        }
    }

    /// State with explicit config and optional pool.
    pub fn with_config(config: AppConfig, db_pool: Option<PgPool>) -> Self {
        Self { config, db_pool }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_port() {
        assert_eq!(AppConfig::default().port, 8000);
    }

    #[test]
    fn new_state_has_no_pool() {
        assert!(AppState::new().db_pool.is_none());
    }
}
