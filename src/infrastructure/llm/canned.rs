//! Canned model provider
//!
//! Answers each flow with a fixed JSON value. Used for the offline demo mode
//! and as the test double for every layer above the model boundary.

use crate::core::ModelError;
use crate::domain::repositories::{LanguageModel, ModelRequest};
use crate::domain::services::{
    RECOVERY_POTENTIAL_FLOW, SIMULATE_RECOVERY_FLOW, THREAT_DETECTION_FLOW, WIPE_ACCURACY_FLOW,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone)]
enum Canned {
    Answer(Value),
    Failure(String),
}

/// A [`LanguageModel`] with scripted answers per flow
#[derive(Debug, Default)]
pub struct CannedModel {
    responses: HashMap<String, Canned>,
    calls: AtomicUsize,
    requests: Mutex<Vec<ModelRequest>>,
}

impl CannedModel {
    /// Creates a model with no answers; every call fails
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `flow` with `answer`
    pub fn with_response(mut self, flow: &str, answer: Value) -> Self {
        self.responses.insert(flow.to_string(), Canned::Answer(answer));
        self
    }

    /// Fails `flow` with `message`
    pub fn with_failure(mut self, flow: &str, message: impl Into<String>) -> Self {
        self.responses
            .insert(flow.to_string(), Canned::Failure(message.into()));
        self
    }

    /// Plausible answers for all four flows
    pub fn demo() -> Self {
        Self::new()
            .with_response(
                WIPE_ACCURACY_FLOW,
                json!({
                    "accuracyAssessment": {
                        "overallAccuracy": "Medium - the log shows a single overwrite pass without verification.",
                        "detailedAnalysis": "The /data partition was overwritten once. No verification pass is recorded and the cache partition is not mentioned.",
                        "confidenceLevel": "Moderate",
                        "recommendations": "Run a verified multi-pass wipe and include every user partition in the log."
                    }
                }),
            )
            .with_response(
                RECOVERY_POTENTIAL_FLOW,
                json!({
                    "overallPotential": "Medium - flash wear levelling may keep stale blocks.",
                    "sensitiveDataLikelihood": "Low - user partitions appear encrypted.",
                    "recommendations": "Image the raw flash chip and search for unencrypted remnants in spare blocks."
                }),
            )
            .with_response(
                THREAT_DETECTION_FLOW,
                json!({
                    "threatsIdentified": [{
                        "threatName": "Plain-text contact exposure",
                        "threatLevel": "Low",
                        "description": "Phone numbers and email addresses are stored without protection."
                    }],
                    "summary": "No malware indicators. Personal data is exposed in plain text."
                }),
            )
            .with_response(
                SIMULATE_RECOVERY_FLOW,
                json!({
                    "recoveredFileContent": "Contacts:\n- J[CORRUPTED_DATA_BLOCK]: +1-555-12??\nUNRECOVERABLE_SECTOR\n",
                    "recoveryLog": "[INFO] Signature scan complete. 18% of sectors recovered.\n[WARN] Fragment chain broken at sector 0x2F."
                }),
            )
    }

    /// Total number of `generate` calls
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of calls made for `flow`
    pub fn calls_for(&self, flow: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|request| request.flow == flow)
            .count()
    }

    /// The most recent request
    pub fn last_request(&self) -> Option<ModelRequest> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait]
impl LanguageModel for CannedModel {
    fn name(&self) -> &str {
        "canned"
    }

    async fn generate(&self, request: ModelRequest) -> Result<Value, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let canned = self.responses.get(&request.flow).cloned();
        let flow = request.flow.clone();
        self.requests.lock().push(request);

        match canned {
            Some(Canned::Answer(answer)) => Ok(answer),
            Some(Canned::Failure(message)) => Err(ModelError::Scripted(message)),
            None => Err(ModelError::NoCannedResponse(flow)),
        }
    }
}
