//! Session store implementations

mod memory_store;

pub use memory_store::InMemorySessionStore;
