//! Recovery simulation contract
//!
//! The model receives a file that was "wiped" and returns an imperfect
//! reconstruction of it plus a narrative log.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// How hard the simulated recovery tries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryEffort {
    Low,
    #[default]
    Medium,
    High,
}

impl RecoveryEffort {
    /// All effort levels, lowest first
    pub const ALL: [RecoveryEffort; 3] = [
        RecoveryEffort::Low,
        RecoveryEffort::Medium,
        RecoveryEffort::High,
    ];

    /// Percentage of content the model is asked to bring back
    ///
    /// This is guidance for the prompt, not a guarantee about the output.
    pub fn target_percent(&self) -> RangeInclusive<u8> {
        match self {
            RecoveryEffort::Low => 10..=20,
            RecoveryEffort::Medium => 50..=70,
            RecoveryEffort::High => 80..=95,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecoveryEffort::Low => "low",
            RecoveryEffort::Medium => "medium",
            RecoveryEffort::High => "high",
        }
    }
}

impl fmt::Display for RecoveryEffort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecoveryEffort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(RecoveryEffort::Low),
            "medium" => Ok(RecoveryEffort::Medium),
            "high" => Ok(RecoveryEffort::High),
            other => Err(format!(
                "unknown recovery effort '{other}' (expected low, medium or high)"
            )),
        }
    }
}

/// Input for the recovery simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateRecoveryInput {
    pub original_data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_file_name: Option<String>,
    pub recovery_effort: RecoveryEffort,
}

/// Output of the recovery simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateRecoveryOutput {
    /// Recovered text, possibly partial or corrupted
    pub recovered_file_content: String,
    pub recovery_log: String,
}
