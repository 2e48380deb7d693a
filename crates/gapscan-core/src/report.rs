//! # Coverage Report Types
//!
//! The output side of the scorer: per-cluster coverage fractions and the
//! assembled report. Reports are derived values — they are never stored
//! independently of the document they were computed from.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::cluster::Cluster;

/// Per-cluster coverage fractions, each in `[0, 1]` rounded to 2 decimals.
///
/// Modeled as a struct rather than a map so the JSON object keys always
/// appear in the fixed cluster order regardless of serializer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct KeywordCoverage {
    pub privacy: f64,
    pub security: f64,
    pub governance: f64,
    pub retention: f64,
    pub training: f64,
    pub vendor: f64,
}

impl KeywordCoverage {
    /// Coverage fraction for a single cluster.
    pub fn get(&self, cluster: Cluster) -> f64 {
        match cluster {
            Cluster::Privacy => self.privacy,
            Cluster::Security => self.security,
            Cluster::Governance => self.governance,
            Cluster::Retention => self.retention,
            Cluster::Training => self.training,
            Cluster::Vendor => self.vendor,
        }
    }

    /// Set the coverage fraction for a single cluster.
    pub fn set(&mut self, cluster: Cluster, fraction: f64) {
        match cluster {
            Cluster::Privacy => self.privacy = fraction,
            Cluster::Security => self.security = fraction,
            Cluster::Governance => self.governance = fraction,
            Cluster::Retention => self.retention = fraction,
            Cluster::Training => self.training = fraction,
            Cluster::Vendor => self.vendor = fraction,
        }
    }

    /// Iterate `(cluster, fraction)` pairs in fixed cluster order.
    pub fn iter(&self) -> impl Iterator<Item = (Cluster, f64)> + '_ {
        Cluster::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Unrounded mean of the six per-cluster fractions.
    pub fn mean(&self) -> f64 {
        let sum: f64 = self.iter().map(|(_, fraction)| fraction).sum();
        sum / Cluster::ALL.len() as f64
    }
}

/// The full analysis result for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CoverageReport {
    /// Mean of the six per-cluster fractions, rounded to 2 decimals.
    pub coverage_score: f64,
    /// Per-cluster coverage fractions.
    pub keyword_coverage: KeywordCoverage,
    /// One `"Missing any mention of {cluster} controls"` entry per cluster
    /// with zero coverage, in fixed cluster order.
    pub gaps: Vec<String>,
    /// Templated narrative: coverage tier plus comma-joined highlights.
    pub summary: String,
    /// Advisory sentences for clusters with coverage below 0.5, in fixed
    /// cluster order. The HTTP layer appends the gap list and two
    /// encouragement sentences on top of these before responding.
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_coverage_get_set_roundtrip() {
        let mut coverage = KeywordCoverage::default();
        coverage.set(Cluster::Security, 0.33);
        assert_eq!(coverage.get(Cluster::Security), 0.33);
        assert_eq!(coverage.get(Cluster::Privacy), 0.0);
    }

    #[test]
    fn iter_yields_fixed_order() {
        let coverage = KeywordCoverage {
            privacy: 0.1,
            security: 0.2,
            governance: 0.3,
            retention: 0.4,
            training: 0.5,
            vendor: 0.6,
        };
        let pairs: Vec<(Cluster, f64)> = coverage.iter().collect();
        assert_eq!(pairs[0], (Cluster::Privacy, 0.1));
        assert_eq!(pairs[5], (Cluster::Vendor, 0.6));
    }

    #[test]
    fn mean_of_uniform_coverage() {
        let coverage = KeywordCoverage {
            privacy: 0.5,
            security: 0.5,
            governance: 0.5,
            retention: 0.5,
            training: 0.5,
            vendor: 0.5,
        };
        assert!((coverage.mean() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn json_keys_in_cluster_order() {
        let json = serde_json::to_string(&KeywordCoverage::default()).unwrap();
        let privacy = json.find("privacy").unwrap();
        let security = json.find("security").unwrap();
        let vendor = json.find("vendor").unwrap();
        assert!(privacy < security && security < vendor);
    }
}
