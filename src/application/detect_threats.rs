//! Detect threats use case

use super::context::{ActionContext, settle};
use super::dto::ActionResult;
use super::error::ActionError;
use crate::domain::entities::{ThreatDetectionInput, ThreatDetectionOutput};
use crate::domain::repositories::SharedSession;

/// Scans extracted device data for security threats
#[derive(Clone)]
pub struct DetectThreatsUseCase {
    context: ActionContext,
}

impl DetectThreatsUseCase {
    pub fn new(context: ActionContext) -> Self {
        Self { context }
    }

    /// Executes the scan
    pub async fn execute(&self, input: ThreatDetectionInput) -> ActionResult<ThreatDetectionOutput> {
        settle("threatDetection", self.run(&input).await)
    }

    /// Executes the scan and keeps a successful result for the report
    pub async fn execute_for_session(
        &self,
        session: &SharedSession,
        input: ThreatDetectionInput,
    ) -> ActionResult<ThreatDetectionOutput> {
        let result = self.execute(input).await;
        if let Some(scan) = result.data() {
            session.lock().record_threat_scan(scan.clone());
            tracing::info!(threats = scan.threats_identified.len(), "threat scan stored");
        }
        result
    }

    async fn run(&self, input: &ThreatDetectionInput) -> Result<ThreatDetectionOutput, ActionError> {
        if input.extracted_data.trim().is_empty() {
            return Err(ActionError::precondition("Extracted data cannot be empty."));
        }
        let flows = self.context.flows();
        Ok(flows.threat_detection.run(self.context.model(), input).await?)
    }
}
