//! Data extraction entity

use serde::{Deserialize, Serialize};

/// Where the extracted data comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionSource {
    /// Fixed demonstration dataset
    #[default]
    Mock,
    /// Content recovered by the wipe/recovery simulation
    Simulation,
}

/// Result of a (simulated) extraction run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub source: ExtractionSource,
    pub extracted_data: String,
    pub extraction_logs: String,
    /// Link to the threat-detection page pre-filled with `extracted_data`
    pub threat_detection_link: String,
}

/// Progress steps of an extraction run, in percent
pub fn progress_steps() -> impl Iterator<Item = u8> {
    (0..=100u8).step_by(10)
}
