//! Flow service
//!
//! A flow is the unit of work delegated to the language model: a typed
//! input rendered through a prompt template, and a typed output decoded from
//! the model's structured answer.

use super::prompt_template::PromptTemplate;
use crate::core::FlowError;
use crate::domain::repositories::{LanguageModel, ModelRequest};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use std::time::Instant;

/// A named input-schema → prompt → output-schema unit of work
pub struct Flow<I, O> {
    name: &'static str,
    template: PromptTemplate,
    output_schema: Value,
    _contract: PhantomData<fn(I) -> O>,
}

impl<I, O> Flow<I, O>
where
    I: Serialize,
    O: DeserializeOwned,
{
    /// Creates a flow
    pub fn new(name: &'static str, template: PromptTemplate, output_schema: Value) -> Self {
        Self {
            name,
            template,
            output_schema,
            _contract: PhantomData,
        }
    }

    /// Returns the flow name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the prompt template
    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    /// Returns the schema the model's answer must follow
    pub fn output_schema(&self) -> &Value {
        &self.output_schema
    }

    /// Renders the input into a model request without sending it
    pub fn build_request(&self, input: &I) -> Result<ModelRequest, FlowError> {
        let vars = serde_json::to_value(input).map_err(|e| FlowError::InvalidInput {
            flow: self.name.to_string(),
            reason: e.to_string(),
        })?;
        let parts = self.template.render(&vars)?;

        Ok(ModelRequest {
            flow: self.name.to_string(),
            parts,
            output_schema: self.output_schema.clone(),
        })
    }

    /// Decodes a structured answer into the output type
    pub fn decode(&self, answer: Value) -> Result<O, FlowError> {
        serde_json::from_value(answer).map_err(|e| FlowError::MalformedOutput {
            flow: self.name.to_string(),
            reason: e.to_string(),
        })
    }

    /// Runs the flow once against `model`
    ///
    /// There is no retry: any transport, model or decoding failure is
    /// returned to the caller as is.
    pub async fn run(&self, model: &dyn LanguageModel, input: &I) -> Result<O, FlowError> {
        let request = self.build_request(input)?;
        let started = Instant::now();

        tracing::info!(
            flow = self.name,
            model = model.name(),
            media_parts = request.media_count(),
            "invoking flow"
        );
        tracing::debug!(flow = self.name, prompt = %request.prompt_text(), "rendered prompt");

        let answer = model.generate(request).await?;
        let output = self.decode(answer)?;

        tracing::info!(
            flow = self.name,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "flow complete"
        );
        Ok(output)
    }
}
