//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use people_core::error::DomainError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An expected field is absent from server-side state, e.g. a session
    /// without an employee id. A configuration/state error, not a client one.
    #[error("Missing identifier: {0}")]
    MissingIdentifier(String),

    /// Non-success response from the external API; the upstream status code
    /// is passed through to the caller.
    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, "Unauthorized", msg)
            }
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "NotFound", msg)
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "BadRequest", msg)
            }
            ApiError::MissingIdentifier(msg) => {
                tracing::error!("Missing identifier: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "MissingIdentifier", msg)
            }
            ApiError::Upstream { status, message } => {
                tracing::error!("Upstream error ({}): {}", status, message);
                let status =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                return (
                    status,
                    Json(ErrorResponse {
                        error: "UpstreamError".to_string(),
                        message,
                    }),
                )
                    .into_response();
            }
            ApiError::UpstreamUnreachable(msg) => {
                tracing::error!("Upstream unreachable: {}", msg);
                (StatusCode::BAD_GATEWAY, "UpstreamUnreachable", msg)
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "InternalError", msg)
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::SessionNotFound => ApiError::Unauthorized("Invalid session".to_string()),
            DomainError::MissingEmployeeId => {
                ApiError::MissingIdentifier("Employee ID missing in session".to_string())
            }
            DomainError::Validation(msg) => ApiError::BadRequest(msg),
            DomainError::Upstream { status, message } => ApiError::Upstream { status, message },
            DomainError::Transport(msg) => ApiError::UpstreamUnreachable(msg),
            DomainError::Persistence(msg) | DomainError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_not_found_maps_to_unauthorized() {
        let err = ApiError::from(DomainError::SessionNotFound);
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn missing_employee_id_maps_to_server_side_error() {
        let err = ApiError::from(DomainError::MissingEmployeeId);
        assert!(matches!(err, ApiError::MissingIdentifier(_)));
    }

    #[test]
    fn upstream_status_is_preserved() {
        let err = ApiError::from(DomainError::Upstream {
            status: 429,
            message: "rate limited".to_string(),
        });
        assert!(matches!(err, ApiError::Upstream { status: 429, .. }));
    }

    #[test]
    fn transport_failures_map_to_bad_gateway() {
        let err = ApiError::from(DomainError::Transport("connection refused".to_string()));
        assert!(matches!(err, ApiError::UpstreamUnreachable(_)));
    }
}
