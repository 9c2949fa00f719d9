//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Session not found")]
    SessionNotFound,

    #[error("Employee ID missing in session")]
    MissingEmployeeId,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// The upstream rejected the credential. The one case the gateway
    /// answers with a token refresh.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, DomainError::Upstream { status: 401, .. })
    }
}
