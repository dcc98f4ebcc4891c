//! Wipe accuracy assessment contract
//!
//! A wipe log goes in, a structured verdict on how thoroughly the device was
//! wiped comes out.

use serde::{Deserialize, Serialize};

/// Input for the wipe accuracy assessment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WipeAccuracyInput {
    /// Wipe log as a base64 data URI
    pub wipe_log_data_uri: String,
}

/// Verdict produced by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyAssessment {
    /// Overall accuracy level with a short justification
    pub overall_accuracy: String,
    /// Narrative analysis of the log
    pub detailed_analysis: String,
    /// How confident the assessment is
    pub confidence_level: String,
    pub recommendations: String,
}

/// Output of the wipe accuracy assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WipeAccuracyOutput {
    pub accuracy_assessment: AccuracyAssessment,
}
