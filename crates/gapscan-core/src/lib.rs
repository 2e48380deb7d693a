//! # gapscan-core — Coverage Scorer
//!
//! The decision logic of the Gapscan compliance gap analyzer. Documents are
//! scored against six fixed compliance keyword clusters (privacy, security,
//! governance, retention, training, vendor) by naive case-insensitive
//! substring matching, producing a [`CoverageReport`] with per-cluster
//! coverage fractions, an overall score, a narrative summary, gap messages,
//! and advisory recommendations.
//!
//! This crate is deliberately free of I/O: [`analyze`] is a pure, total,
//! deterministic function over any string input. Upload handling,
//! persistence, and the HTTP surface live in `gapscan-api`.

pub mod cluster;
pub mod report;
pub mod scorer;

pub use cluster::Cluster;
pub use report::{CoverageReport, KeywordCoverage};
pub use scorer::analyze;
