//! Threat detection contract

use serde::{Deserialize, Serialize};

/// Input for the threat scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatDetectionInput {
    pub extracted_data: String,
}

/// A single threat reported by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Threat {
    pub threat_name: String,
    /// Severity as reported (usually High, Medium or Low)
    pub threat_level: String,
    pub description: String,
}

/// Display variant for a threat's severity badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityBadge {
    Destructive,
    Secondary,
    Default,
    Outline,
}

impl Threat {
    /// Maps the free-text severity to a badge, case-insensitively
    pub fn severity_badge(&self) -> SeverityBadge {
        match self.threat_level.trim().to_lowercase().as_str() {
            "high" => SeverityBadge::Destructive,
            "medium" => SeverityBadge::Secondary,
            "low" => SeverityBadge::Default,
            _ => SeverityBadge::Outline,
        }
    }
}

/// Output of the threat scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatDetectionOutput {
    #[serde(default)]
    pub threats_identified: Vec<Threat>,
    pub summary: String,
}

impl ThreatDetectionOutput {
    /// Returns whether the scan found nothing
    pub fn is_clean(&self) -> bool {
        self.threats_identified.is_empty()
    }

    /// Counts threats whose badge matches
    pub fn count_with_badge(&self, badge: SeverityBadge) -> usize {
        self.threats_identified
            .iter()
            .filter(|t| t.severity_badge() == badge)
            .count()
    }
}
