//! # People Infrastructure
//!
//! Adapters implementing the core ports: session stores and the Zoho
//! HTTP client.

pub mod store;
pub mod zoho;

pub use store::{FileSessionStore, MemorySessionStore};
pub use zoho::ZohoHttpClient;
