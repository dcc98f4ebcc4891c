//! Flow definitions
//!
//! The four flows the hub delegates to the language model, with their prompt
//! templates and output schemas. Schemas use the OpenAPI subset accepted by
//! structured-output model endpoints.

use super::flow::Flow;
use super::prompt_template::PromptTemplate;
use crate::domain::entities::{
    RecoveryEffort, RecoveryPotentialInput, RecoveryPotentialOutput, SimulateRecoveryInput,
    SimulateRecoveryOutput, ThreatDetectionInput, ThreatDetectionOutput, WipeAccuracyInput,
    WipeAccuracyOutput,
};
use serde_json::{Value, json};

pub const WIPE_ACCURACY_FLOW: &str = "wipeAccuracyAssessmentFlow";
pub const RECOVERY_POTENTIAL_FLOW: &str = "recoveryPotentialAnalysisFlow";
pub const THREAT_DETECTION_FLOW: &str = "threatDetectionFlow";
pub const SIMULATE_RECOVERY_FLOW: &str = "simulateFileRecoveryFlow";

const WIPE_ACCURACY_TEMPLATE: &str = "\
You are a mobile forensics examiner reviewing the log produced by a data wipe.

Wipe log:
{{media url=wipeLogDataUri}}

Judge how completely the wipe removed user data. Look at the method used, the \
partitions and storage regions covered, verification passes, reported errors and \
anything the log leaves out.

Report an overall accuracy (High, Medium or Low) with a one-line justification, a \
detailed analysis, your confidence level in the assessment, and recommendations \
for closing any gaps.
";

const RECOVERY_POTENTIAL_TEMPLATE: &str = "\
You are a forensic data recovery expert assessing a mobile device.

Device description: {{{deviceDescription}}}
Device image: {{media url=deviceImageUri}}
{{#if wipeAccuracyReport}}Wipe accuracy report: {{{wipeAccuracyReport}}}
{{else}}No wipe accuracy report was supplied.
{{/if}}
Consider the device type, its storage technology, any wipe that was performed and \
how reliable it was, and the recovery techniques that apply to mobile devices.

Give the overall potential for recovery (High, Medium or Low) and the likelihood \
of recovering sensitive data (High, Medium or Low), each with a justification, \
followed by recommendations for further investigation and recovery techniques.
";

const THREAT_DETECTION_TEMPLATE: &str = "\
You are a mobile security analyst examining data extracted from a device.

Extracted data:
{{extractedData}}

Look for malware, spyware, phishing content, leaked credentials and other security \
weaknesses. List every threat you find with its name, severity (High, Medium or \
Low) and a description. Return an empty list when nothing is found. Finish with a \
summary of the device's overall security posture.
";

/// Builds the recovery simulation prompt with the effort ranges filled in
fn simulate_recovery_template() -> String {
    let guidance: String = RecoveryEffort::ALL
        .iter()
        .map(|effort| {
            let range = effort.target_percent();
            let detail = match effort {
                RecoveryEffort::Low => {
                    "only small, fragmented pieces survive; replace most sections with \
                     placeholders such as UNRECOVERABLE_SECTOR or CORRUPTED_DATA_BLOCK"
                }
                RecoveryEffort::Medium => {
                    "a substantial part survives, with visible corruption, gaps or \
                     jumbled sections"
                }
                RecoveryEffort::High => {
                    "most content survives, with small missing fragments or minor \
                     corruption in less important areas"
                }
            };
            format!(
                "- '{}': recover roughly {}-{}% of the content; {}.\n",
                effort.as_str(),
                range.start(),
                range.end(),
                detail
            )
        })
        .collect();

    format!(
        "\
You are a data recovery specialist simulating the recovery of a wiped file named \
{{{{#if originalFileName}}}}'{{{{originalFileName}}}}'{{{{else}}}}'unknown file'{{{{/if}}}}.

Original file content:
```
{{{{{{originalData}}}}}}
```

Recovery effort: {{{{{{recoveryEffort}}}}}}

Produce 'recoveredFileContent' and 'recoveryLog'.

The recovered content must reflect the effort level:
{guidance}
Never return the original unchanged. Keep short files short. Preserve section \
headings such as \"Contacts:\" or \"Call Logs:\" while dropping or damaging \
entries within them.

The recovery log should read like forensic tool output: techniques applied (for \
example signature scanning or fragment reassembly), the share of sectors scanned \
and recovered, where recovery failed and why, and any anomalies.
"
    )
}

fn wipe_accuracy_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "accuracyAssessment": {
                "type": "OBJECT",
                "properties": {
                    "overallAccuracy": { "type": "STRING", "description": "High, Medium or Low with justification." },
                    "detailedAnalysis": { "type": "STRING" },
                    "confidenceLevel": { "type": "STRING" },
                    "recommendations": { "type": "STRING" }
                },
                "required": ["overallAccuracy", "detailedAnalysis", "confidenceLevel", "recommendations"]
            }
        },
        "required": ["accuracyAssessment"]
    })
}

fn recovery_potential_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "overallPotential": { "type": "STRING", "description": "High, Medium or Low with justification." },
            "sensitiveDataLikelihood": { "type": "STRING", "description": "High, Medium or Low with justification." },
            "recommendations": { "type": "STRING" }
        },
        "required": ["overallPotential", "sensitiveDataLikelihood", "recommendations"]
    })
}

fn threat_detection_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "threatsIdentified": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "threatName": { "type": "STRING" },
                        "threatLevel": { "type": "STRING", "description": "Severity level of the threat." },
                        "description": { "type": "STRING" }
                    },
                    "required": ["threatName", "threatLevel", "description"]
                }
            },
            "summary": { "type": "STRING" }
        },
        "required": ["threatsIdentified", "summary"]
    })
}

fn simulate_recovery_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "recoveredFileContent": { "type": "STRING", "description": "Recovered text; may be partial or corrupted." },
            "recoveryLog": { "type": "STRING" }
        },
        "required": ["recoveredFileContent", "recoveryLog"]
    })
}

/// The hub's flows, built once and shared
pub struct FlowCatalog {
    pub wipe_accuracy: Flow<WipeAccuracyInput, WipeAccuracyOutput>,
    pub recovery_potential: Flow<RecoveryPotentialInput, RecoveryPotentialOutput>,
    pub threat_detection: Flow<ThreatDetectionInput, ThreatDetectionOutput>,
    pub simulate_recovery: Flow<SimulateRecoveryInput, SimulateRecoveryOutput>,
}

impl FlowCatalog {
    /// Builds the standard catalog
    pub fn standard() -> Self {
        Self {
            wipe_accuracy: Flow::new(
                WIPE_ACCURACY_FLOW,
                PromptTemplate::new(WIPE_ACCURACY_TEMPLATE),
                wipe_accuracy_schema(),
            ),
            recovery_potential: Flow::new(
                RECOVERY_POTENTIAL_FLOW,
                PromptTemplate::new(RECOVERY_POTENTIAL_TEMPLATE),
                recovery_potential_schema(),
            ),
            threat_detection: Flow::new(
                THREAT_DETECTION_FLOW,
                PromptTemplate::new(THREAT_DETECTION_TEMPLATE),
                threat_detection_schema(),
            ),
            simulate_recovery: Flow::new(
                SIMULATE_RECOVERY_FLOW,
                PromptTemplate::new(simulate_recovery_template()),
                simulate_recovery_schema(),
            ),
        }
    }

    /// Names of all flows in the catalog
    pub fn names(&self) -> [&'static str; 4] {
        [
            self.wipe_accuracy.name(),
            self.recovery_potential.name(),
            self.threat_detection.name(),
            self.simulate_recovery.name(),
        ]
    }
}

impl Default for FlowCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
