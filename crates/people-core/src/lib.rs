//! # People Core
//!
//! Domain entities, services, and port traits for the Zoho People proxy.

pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;
pub mod upstream;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
