//! # API Route Modules
//!
//! Route modules for the Gapscan API surface:
//!
//! - `analyze` — document upload, best-effort decode, coverage scoring, and
//!   best-effort persistence (`POST /api/analyze`).
//! - `analyses` — recent persisted analyses (`GET /api/analyses`).
//! - `diagnostics` — root and hello greetings plus the database-connectivity
//!   diagnostic (`GET /`, `GET /api/hello`, `GET /test`).

pub mod analyses;
pub mod analyze;
pub mod diagnostics;
