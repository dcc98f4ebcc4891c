//! Assess wipe accuracy use case

use super::context::{ActionContext, settle};
use super::dto::ActionResult;
use super::error::ActionError;
use crate::domain::entities::{WipeAccuracyInput, WipeAccuracyOutput};

/// Rates how thoroughly a wipe log shows data was removed
#[derive(Clone)]
pub struct AssessWipeAccuracyUseCase {
    context: ActionContext,
}

impl AssessWipeAccuracyUseCase {
    pub fn new(context: ActionContext) -> Self {
        Self { context }
    }

    /// Executes the assessment
    pub async fn execute(&self, input: WipeAccuracyInput) -> ActionResult<WipeAccuracyOutput> {
        settle("assessWipeAccuracy", self.run(&input).await)
    }

    async fn run(&self, input: &WipeAccuracyInput) -> Result<WipeAccuracyOutput, ActionError> {
        if input.wipe_log_data_uri.is_empty() {
            return Err(ActionError::precondition("Wipe log file is required."));
        }
        let flows = self.context.flows();
        Ok(flows.wipe_accuracy.run(self.context.model(), input).await?)
    }
}
