//! Session store trait
//!
//! Sessions replace per-browser storage: every workflow step reads and writes
//! the visitor's [`Session`] through this trait.

use crate::domain::entities::Session;
use parking_lot::Mutex;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

/// A session shared between concurrent requests of the same visitor
///
/// The guard is not `Send`, so it cannot be held across an `.await`.
pub type SharedSession = Arc<Mutex<Session>>;

/// Opaque session identifier carried in the session cookie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Trait for keeping sessions between requests
pub trait SessionStore: Send + Sync {
    /// Keeps `session` under `id`, replacing any previous entry
    fn insert(&self, id: SessionId, session: SharedSession);

    /// Looks up an existing session
    fn get(&self, id: &SessionId) -> Option<SharedSession>;

    /// Drops a session, returning whether it existed
    fn remove(&self, id: &SessionId) -> bool;

    /// Number of live sessions
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Creates and stores an empty session
    fn open(&self) -> (SessionId, SharedSession) {
        let id = SessionId::generate();
        let session = Arc::new(Mutex::new(Session::new()));
        self.insert(id, Arc::clone(&session));
        (id, session)
    }
}
