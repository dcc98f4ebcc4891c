//! Language model providers

mod canned;
mod gemini;

pub use canned::CannedModel;
pub use gemini::GeminiModel;

use crate::core::{ModelConfig, ModelError, ModelProvider};
use crate::domain::repositories::LanguageModel;
use std::sync::Arc;

/// Builds the provider selected in the configuration
pub fn build_model(config: &ModelConfig) -> Result<Arc<dyn LanguageModel>, ModelError> {
    match config.provider {
        ModelProvider::Gemini => Ok(Arc::new(GeminiModel::from_config(config)?)),
        ModelProvider::Canned => Ok(Arc::new(CannedModel::demo())),
    }
}
