//! Domain layer
//!
//! Flow contracts, the session state machine, repository traits for the
//! language model and session store, and the services built on them. Nothing
//! here knows about HTTP or a concrete model provider.

pub mod entities;
pub mod repositories;
pub mod services;
