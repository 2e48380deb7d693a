//! # gapscan-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the Gapscan compliance gap analyzer.
//! Binds to a configurable port (env `PORT`, default 8000).

use gapscan_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();

    // Initialize database pool (optional). A failed connection is absorbed:
    // the service still starts, it just cannot persist analyses.
    let db_pool = match gapscan_api::db::init_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database initialization failed: {e}. Continuing without persistence.");
            None
        }
    };

    let port = config.port;
    let state = AppState::with_config(config, db_pool);
    let app = gapscan_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Gapscan API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
