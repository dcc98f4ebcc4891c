//! Repository traits (interfaces)
//!
//! These traits define the contracts for external dependencies: the language
//! model that answers flows and the store that keeps sessions.

mod language_model;
mod session_store;

pub use language_model::{LanguageModel, ModelRequest, PromptPart};
pub use session_store::{SessionId, SessionStore, SharedSession};
