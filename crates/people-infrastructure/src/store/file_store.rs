//! File-backed session store
//!
//! In-memory map snapshotted to a JSON file on every mutation and loaded
//! once at process start. Writes go to a sibling `.tmp` file and are
//! renamed into place, so the snapshot is either old or new, never torn.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use people_core::domain::{Session, SessionCredentials, SessionPatch};
use people_core::error::DomainError;
use people_core::repositories::SessionStore;
use people_shared::SessionId;

pub struct FileSessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
    path: PathBuf,
    /// Serializes snapshot writes; the map snapshot is taken under this
    /// lock so the last write always reflects the newest state.
    persist_lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            path: path.as_ref().to_path_buf(),
            persist_lock: Mutex::new(()),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    /// Mutating operations persist best-effort: a failed write is logged
    /// but never rolls back the in-memory change.
    async fn persist_best_effort(&self) {
        if let Err(e) = self.persist().await {
            error!("Failed to save sessions: {}", e);
        }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn create(&self, credentials: SessionCredentials) -> Session {
        let session = Session::new(credentials);
        self.sessions
            .write()
            .insert(session.id.clone(), session.clone());
        self.persist_best_effort().await;
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
        let updated = {
            let mut sessions = self.sessions.write();
            match sessions.get_mut(id) {
                Some(session) => {
                    patch.apply(session);
                    true
                }
                None => false,
            }
        };
        if updated {
            self.persist_best_effort().await;
            info!("Updated session {}", id);
        } else {
            warn!("Attempted to update missing session {}", id);
        }
        updated
    }

    async fn delete(&self, id: &str) -> bool {
        let removed = self.sessions.write().remove(id).is_some();
        if removed {
            self.persist_best_effort().await;
            info!("Deleted session {}", id);
        } else {
            warn!("Attempted to delete missing session {}", id);
        }
        removed
    }

    async fn load(&self) -> usize {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No existing session file found. Starting fresh.");
                return 0;
            }
            Err(e) => {
                error!("Failed to read session file: {}. Starting fresh.", e);
                return 0;
            }
        };
        match serde_json::from_str::<HashMap<SessionId, Session>>(&contents) {
            Ok(loaded) => {
                let count = loaded.len();
                *self.sessions.write() = loaded;
                info!("Loaded {} sessions from disk", count);
                count
            }
            Err(e) => {
                error!("Session file corrupted, starting fresh: {}", e);
                *self.sessions.write() = HashMap::new();
                0
            }
        }
    }

    async fn persist(&self) -> Result<(), DomainError> {
        let _guard = self.persist_lock.lock().await;
        let (json, count) = {
            let sessions = self.sessions.read();
            let json = serde_json::to_string_pretty(&*sessions)
                .map_err(|e| DomainError::Persistence(e.to_string()))?;
            (json, sessions.len())
        };
        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| DomainError::Persistence(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| DomainError::Persistence(e.to_string()))?;
        info!("Saved {} sessions to disk", count);
        Ok(())
    }
}
