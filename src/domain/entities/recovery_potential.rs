//! Recovery potential analysis contract

use serde::{Deserialize, Serialize};

/// Input for the recovery potential analysis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryPotentialInput {
    /// Device image as a base64 data URI
    pub device_image_uri: String,
    /// Free-text wipe accuracy report; empty when not available
    #[serde(default)]
    pub wipe_accuracy_report: String,
    pub device_description: String,
}

/// Output of the recovery potential analysis
///
/// Levels are High, Medium or Low followed by a justification. They are kept
/// as model-supplied text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryPotentialOutput {
    pub overall_potential: String,
    pub sensitive_data_likelihood: String,
    pub recommendations: String,
}
