//! # Middleware
//!
//! HTTP-level middleware for the Gapscan API. Currently only the Prometheus
//! metrics recorder; tracing is layered directly via `tower_http::TraceLayer`.

pub mod metrics;
