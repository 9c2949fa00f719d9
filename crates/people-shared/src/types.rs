//! Common types

use uuid::Uuid;

/// Opaque session identifier. Kept as text because it round-trips through
/// query strings and the snapshot file; an unparseable value is simply a
/// store miss, not a request error.
pub type SessionId = String;

pub fn new_session_id() -> SessionId {
    Uuid::new_v4().to_string()
}
