//! In-memory session store
//!
//! Stored sessions live for the lifetime of the process.

use crate::domain::repositories::{SessionId, SessionStore, SharedSession};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Process-local [`SessionStore`]
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, SharedSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn insert(&self, id: SessionId, session: SharedSession) {
        self.sessions.write().insert(id, session);
        tracing::debug!(session = %id, "session stored");
    }

    fn get(&self, id: &SessionId) -> Option<SharedSession> {
        self.sessions.read().get(id).cloned()
    }

    fn remove(&self, id: &SessionId) -> bool {
        self.sessions.write().remove(id).is_some()
    }

    fn len(&self) -> usize {
        self.sessions.read().len()
    }
}
