//! Simulate recovery use case

use super::context::{ActionContext, settle};
use super::dto::ActionResult;
use super::error::ActionError;
use crate::domain::entities::{SimulateRecoveryInput, SimulateRecoveryOutput};

/// Asks the model for an imperfect reconstruction of a wiped file
#[derive(Clone)]
pub struct SimulateRecoveryUseCase {
    context: ActionContext,
}

impl SimulateRecoveryUseCase {
    pub fn new(context: ActionContext) -> Self {
        Self { context }
    }

    /// Executes the simulation
    pub async fn execute(&self, input: SimulateRecoveryInput) -> ActionResult<SimulateRecoveryOutput> {
        settle("simulateRecovery", self.run(&input).await)
    }

    async fn run(
        &self,
        input: &SimulateRecoveryInput,
    ) -> Result<SimulateRecoveryOutput, ActionError> {
        if input.original_data.trim().is_empty() {
            return Err(ActionError::precondition(
                "Original file content for recovery cannot be empty.",
            ));
        }
        let flows = self.context.flows();
        Ok(flows.simulate_recovery.run(self.context.model(), input).await?)
    }
}
