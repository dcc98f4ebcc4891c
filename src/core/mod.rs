//! Cross-cutting building blocks: error types and runtime configuration.

pub mod config;
pub mod error;

pub use config::{
    ConfigError, HubConfig, ModelConfig, ModelProvider, ServerConfig, SessionConfig, WorkflowConfig,
};
pub use error::{DataUriError, FlowError, ModelError, TemplateError};
