//! Infrastructure layer
//!
//! Concrete implementations of the domain repositories: language model
//! providers and the session store.

pub mod llm;
pub mod session;
