//! # Coverage Scorer
//!
//! The one piece of Gapscan with decision logic: a pure function from
//! document text to a [`CoverageReport`]. Everything here is synchronous and
//! total — any string input, including the empty string, produces a report.
//!
//! The algorithm is deliberately naive: lowercase the text once, count
//! distinct marker substrings per cluster, and derive fractions, gaps, a
//! tiered narrative summary, and advisory sentences. No tokenization, no
//! stemming, no language awareness.

use crate::cluster::Cluster;
use crate::report::{CoverageReport, KeywordCoverage};

/// Summary tier for an overall score of at least 0.75.
const TIER_HIGH: &str = "rock-solid — almost party-ready for auditors!";
/// Summary tier for an overall score in `[0.5, 0.75)`.
const TIER_MID: &str = "decent — with a few rhythm breaks to smooth out.";
/// Summary tier for an overall score below 0.5.
const TIER_LOW: &str = "a work-in-progress — let's add some shiny controls.";

/// Round to 2 decimal places, half away from zero.
///
/// Rounding mode matters at exact ties; `f64::round` (half away from zero)
/// is used consistently throughout: 2/6 rounds to 0.33 and a 0.33/6 mean
/// rounds to 0.06.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Number of distinct cluster markers present in the lowercased text.
///
/// Each marker counts at most once no matter how often it occurs.
fn marker_hits(lower: &str, cluster: Cluster) -> usize {
    cluster
        .markers()
        .iter()
        .filter(|marker| lower.contains(**marker))
        .count()
}

/// Score a document against the six fixed compliance clusters.
///
/// Pure and deterministic: the same text always yields an identical report.
/// Decoding of uploaded bytes happens at the ingestion boundary — this
/// function assumes well-formed UTF-8 and cannot fail.
pub fn analyze(text: &str) -> CoverageReport {
    let lower = text.to_lowercase();

    let mut keyword_coverage = KeywordCoverage::default();
    let mut present: Vec<Cluster> = Vec::new();
    let mut gaps: Vec<String> = Vec::new();

    for cluster in Cluster::ALL {
        let markers = cluster.markers();
        let hits = marker_hits(&lower, cluster);
        let fraction = round2(hits as f64 / markers.len() as f64);
        keyword_coverage.set(cluster, fraction);
        if fraction > 0.0 {
            present.push(cluster);
        } else {
            gaps.push(cluster.gap_message());
        }
    }

    // The overall score averages the already-rounded per-cluster fractions.
    let coverage_score = round2(keyword_coverage.mean());

    let tier = if coverage_score >= 0.75 {
        TIER_HIGH
    } else if coverage_score >= 0.5 {
        TIER_MID
    } else {
        TIER_LOW
    };

    let highlights = if present.is_empty() {
        "none yet".to_string()
    } else {
        present
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let summary = format!("Your compliance groove is {tier} Highlights: {highlights}");

    let recommendations = Cluster::ALL
        .into_iter()
        .filter(|cluster| keyword_coverage.get(*cluster) < 0.5)
        .map(|cluster| cluster.advisory().to_string())
        .collect();

    CoverageReport {
        coverage_score,
        keyword_coverage,
        gaps,
        summary,
        recommendations,
    }
}
