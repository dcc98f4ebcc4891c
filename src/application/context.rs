//! Shared action context

use super::dto::ActionResult;
use super::error::ActionError;
use crate::domain::repositories::LanguageModel;
use crate::domain::services::FlowCatalog;
use std::sync::Arc;

/// The model and flows every action runs against
#[derive(Clone)]
pub struct ActionContext {
    model: Arc<dyn LanguageModel>,
    flows: Arc<FlowCatalog>,
}

impl ActionContext {
    /// Creates a context with the standard flow catalog
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self::with_flows(model, Arc::new(FlowCatalog::standard()))
    }

    pub fn with_flows(model: Arc<dyn LanguageModel>, flows: Arc<FlowCatalog>) -> Self {
        Self { model, flows }
    }

    pub fn model(&self) -> &dyn LanguageModel {
        self.model.as_ref()
    }

    pub fn flows(&self) -> &FlowCatalog {
        &self.flows
    }
}

/// Converts an action outcome into its result, logging failures
pub(crate) fn settle<T>(action: &'static str, outcome: Result<T, ActionError>) -> ActionResult<T> {
    match outcome {
        Ok(data) => ActionResult::Success(data),
        Err(e) if e.is_rejection() => {
            tracing::warn!(action, reason = %e, "action rejected");
            ActionResult::Failure(e.to_string())
        }
        Err(e) => {
            tracing::error!(action, error = %e, "action failed");
            ActionResult::Failure(e.to_string())
        }
    }
}
