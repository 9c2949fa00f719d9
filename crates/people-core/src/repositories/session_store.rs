//! Session store trait (port)

use async_trait::async_trait;

use crate::domain::{Session, SessionCredentials, SessionPatch};
use crate::error::DomainError;

/// Key-value persistence for sessions. "Not found" is never an error here;
/// callers check the returned `Option`/`bool`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Generate a fresh id, stamp creation time, insert, and persist.
    /// A persistence failure is logged but never rolls back the insert.
    async fn create(&self, credentials: SessionCredentials) -> Session;

    /// Non-mutating lookup.
    async fn get(&self, id: &str) -> Option<Session>;

    /// Merge fields into an existing record and persist. Returns `false`
    /// (logged, non-fatal) when the id is absent.
    async fn update(&self, id: &str, patch: SessionPatch) -> bool;

    /// Remove the record and persist. Returns whether removal occurred.
    async fn delete(&self, id: &str) -> bool;

    /// Read the snapshot at process start. Absent or corrupt snapshots
    /// yield an empty store. Returns the number of sessions loaded.
    async fn load(&self) -> usize;

    /// Serialize the entire mapping to durable storage.
    async fn persist(&self) -> Result<(), DomainError>;
}
