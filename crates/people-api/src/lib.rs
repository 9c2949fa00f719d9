//! # People API
//!
//! HTTP handlers, error mapping, and the router.

pub mod error;
pub mod handlers;
pub mod router;

pub use error::ApiError;
pub use router::{build_router, ApiContext};
