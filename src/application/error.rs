use crate::core::{DataUriError, FlowError};
use crate::domain::entities::SimulationError;
use thiserror::Error;

/// Errors raised by server actions and workflows
#[derive(Error, Debug)]
pub enum ActionError {
    /// A required input was missing; the flow was not invoked
    #[error("{0}")]
    Precondition(String),

    #[error(transparent)]
    Flow(#[from] FlowError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error("Uploaded file could not be read: {0}")]
    Upload(#[from] DataUriError),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl ActionError {
    pub fn precondition(message: impl Into<String>) -> Self {
        ActionError::Precondition(message.into())
    }

    /// Returns whether the flow was never reached
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            ActionError::Precondition(_) | ActionError::Simulation(_) | ActionError::Upload(_)
        )
    }
}
