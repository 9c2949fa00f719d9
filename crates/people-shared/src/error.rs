//! Application error types

use thiserror::Error;

/// Errors raised while bringing the process up (config, telemetry).
/// Domain and HTTP errors live in their own crates.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Telemetry error: {0}")]
    Telemetry(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
