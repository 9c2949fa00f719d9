//! In-memory session store
//!
//! Same contract as [`super::FileSessionStore`] without a snapshot file.
//! Substitutable backend for tests and embedded use.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{info, warn};

use people_core::domain::{Session, SessionCredentials, SessionPatch};
use people_core::error::DomainError;
use people_core::repositories::SessionStore;
use people_shared::SessionId;

#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, credentials: SessionCredentials) -> Session {
        let session = Session::new(credentials);
        self.sessions
            .write()
            .insert(session.id.clone(), session.clone());
        info!("Created session {}", session.id);
        session
    }

    async fn get(&self, id: &str) -> Option<Session> {
        let session = self.sessions.read().get(id).cloned();
        match &session {
            Some(_) => info!("Loaded session {}", id),
            None => warn!("Attempted to load non-existent session {}", id),
        }
        session
    }

    async fn update(&self, id: &str, patch: SessionPatch) -> bool {
        let mut sessions = self.sessions.write();
        match sessions.get_mut(id) {
            Some(session) => {
                patch.apply(session);
                info!("Updated session {}", id);
                true
            }
            None => {
                warn!("Attempted to update missing session {}", id);
                false
            }
        }
    }

    async fn delete(&self, id: &str) -> bool {
        let removed = self.sessions.write().remove(id).is_some();
        if removed {
            info!("Deleted session {}", id);
        } else {
            warn!("Attempted to delete missing session {}", id);
        }
        removed
    }

    async fn load(&self) -> usize {
        0
    }

    async fn persist(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
