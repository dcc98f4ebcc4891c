//! Language model trait
//!
//! Defines the boundary between flows and whatever answers them. A flow
//! hands over a rendered prompt plus the JSON schema its output must follow,
//! and receives the model's structured answer as JSON.

use crate::core::ModelError;
use async_trait::async_trait;
use serde_json::Value;

/// One piece of a rendered prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptPart {
    /// Plain prompt text
    Text(String),
    /// Inline binary content, base64 encoded
    Media { mime_type: String, data: String },
}

impl PromptPart {
    /// Returns the text if this is a text part
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PromptPart::Text(text) => Some(text),
            PromptPart::Media { .. } => None,
        }
    }
}

/// A request for a structured completion
#[derive(Debug, Clone)]
pub struct ModelRequest {
    /// Name of the flow issuing the request
    pub flow: String,
    /// Rendered prompt, in order
    pub parts: Vec<PromptPart>,
    /// Schema the answer must satisfy
    pub output_schema: Value,
}

impl ModelRequest {
    /// Concatenates the text parts, skipping media
    pub fn prompt_text(&self) -> String {
        self.parts.iter().filter_map(PromptPart::as_text).collect()
    }

    /// Counts the media parts
    pub fn media_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|p| matches!(p, PromptPart::Media { .. }))
            .count()
    }
}

/// Trait for structured-output language models
///
/// Implementations must return a JSON value that the caller will try to
/// decode into the flow's output type. They do not retry.
///
/// # Example
///
/// ```ignore
/// let model = GeminiModel::from_config(&config.model)?;
/// let answer = model.generate(request).await?;
/// let output: ThreatDetectionOutput = serde_json::from_value(answer)?;
/// ```
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Sends the request and returns the structured answer
    async fn generate(&self, request: ModelRequest) -> Result<Value, ModelError>;
}
