//! Analyze recovery potential use case

use super::context::{ActionContext, settle};
use super::dto::ActionResult;
use super::error::ActionError;
use crate::domain::entities::{RecoveryPotentialInput, RecoveryPotentialOutput};

/// Estimates how much data could still be recovered from a device
#[derive(Clone)]
pub struct AnalyzeRecoveryPotentialUseCase {
    context: ActionContext,
}

impl AnalyzeRecoveryPotentialUseCase {
    pub fn new(context: ActionContext) -> Self {
        Self { context }
    }

    /// Executes the analysis
    ///
    /// The wipe accuracy report is optional.
    pub async fn execute(
        &self,
        input: RecoveryPotentialInput,
    ) -> ActionResult<RecoveryPotentialOutput> {
        settle("recoveryPotentialAnalysis", self.run(&input).await)
    }

    async fn run(
        &self,
        input: &RecoveryPotentialInput,
    ) -> Result<RecoveryPotentialOutput, ActionError> {
        if input.device_image_uri.is_empty() {
            return Err(ActionError::precondition("Device image file is required."));
        }
        if input.device_description.is_empty() {
            return Err(ActionError::precondition("Device description is required."));
        }
        let flows = self.context.flows();
        Ok(flows.recovery_potential.run(self.context.model(), input).await?)
    }
}
