//! # Compliance Keyword Clusters
//!
//! The six compliance topic groups a document is scored against. The table
//! is fixed at build time: each cluster maps to an ordered set of lowercase
//! marker substrings, a gap message, and an advisory sentence. There is no
//! runtime configuration or reload — the set is a process-wide constant.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One of the six fixed compliance topic clusters.
///
/// Iteration order ([`Cluster::ALL`]) is part of the contract: highlights in
/// the narrative summary and per-cluster coverage keys always appear as
/// privacy, security, governance, retention, training, vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Cluster {
    Privacy,
    Security,
    Governance,
    Retention,
    Training,
    Vendor,
}

impl Cluster {
    /// All clusters in fixed scoring order.
    pub const ALL: [Cluster; 6] = [
        Cluster::Privacy,
        Cluster::Security,
        Cluster::Governance,
        Cluster::Retention,
        Cluster::Training,
        Cluster::Vendor,
    ];

    /// Lowercase cluster identifier used in JSON keys and narrative text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Cluster::Privacy => "privacy",
            Cluster::Security => "security",
            Cluster::Governance => "governance",
            Cluster::Retention => "retention",
            Cluster::Training => "training",
            Cluster::Vendor => "vendor",
        }
    }

    /// The lowercase marker substrings whose presence counts toward this
    /// cluster's coverage. Every cluster has at least one marker, so the
    /// coverage fraction denominator is never zero.
    ///
    /// Markers are matched as plain substrings — "archiv" deliberately
    /// catches both "archive" and "archival".
    pub fn markers(&self) -> &'static [&'static str] {
        match self {
            Cluster::Privacy => &["privacy", "personal data", "pii", "consent", "gdpr", "ccpa"],
            Cluster::Security => &[
                "encryption",
                "access control",
                "key management",
                "vulnerability",
                "patch",
                "incident",
            ],
            Cluster::Governance => &["risk", "policy", "procedure", "audit", "control", "evidence"],
            Cluster::Retention => &["retention", "archiv", "delete", "erase", "data minimization"],
            Cluster::Training => &["training", "awareness", "onboarding", "annual", "phishing"],
            Cluster::Vendor => &[
                "third party",
                "vendor",
                "processor",
                "subprocessor",
                "assessment",
            ],
        }
    }

    /// Gap message emitted when a cluster has zero coverage.
    pub fn gap_message(&self) -> String {
        format!("Missing any mention of {} controls", self.as_str())
    }

    /// Advisory sentence recommended when this cluster's coverage fraction
    /// falls below 0.5.
    pub fn advisory(&self) -> &'static str {
        match self {
            Cluster::Privacy => {
                "Add a clear privacy section covering consent, PII handling and data rights."
            }
            Cluster::Security => {
                "Document technical controls like encryption at rest/in transit and access policies."
            }
            Cluster::Governance => {
                "Describe your risk assessment, audit cadence and evidence collection."
            }
            Cluster::Retention => "Define data retention schedules and deletion processes.",
            Cluster::Training => "Include security awareness and annual training details.",
            Cluster::Vendor => "Explain third-party risk management and vendor assessments.",
        }
    }
}

impl std::fmt::Display for Cluster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_clusters_in_fixed_order() {
        let ids: Vec<&str> = Cluster::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(
            ids,
            vec!["privacy", "security", "governance", "retention", "training", "vendor"]
        );
    }

    #[test]
    fn every_cluster_has_markers() {
        for cluster in Cluster::ALL {
            assert!(!cluster.markers().is_empty(), "{cluster} has no markers");
        }
    }

    #[test]
    fn markers_are_lowercase() {
        for cluster in Cluster::ALL {
            for marker in cluster.markers() {
                assert_eq!(
                    *marker,
                    marker.to_lowercase(),
                    "{cluster} marker {marker:?} is not lowercase"
                );
            }
        }
    }

    #[test]
    fn gap_message_names_the_cluster() {
        assert_eq!(
            Cluster::Privacy.gap_message(),
            "Missing any mention of privacy controls"
        );
        assert_eq!(
            Cluster::Vendor.gap_message(),
            "Missing any mention of vendor controls"
        );
    }

    #[test]
    fn serializes_as_lowercase_id() {
        let json = serde_json::to_string(&Cluster::Governance).unwrap();
        assert_eq!(json, "\"governance\"");
        let back: Cluster = serde_json::from_str("\"retention\"").unwrap();
        assert_eq!(back, Cluster::Retention);
    }

    #[test]
    fn display_matches_as_str() {
        for cluster in Cluster::ALL {
            assert_eq!(format!("{cluster}"), cluster.as_str());
        }
    }
}
