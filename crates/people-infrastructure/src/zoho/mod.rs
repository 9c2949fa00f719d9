//! Zoho HTTP adapter

pub mod client;

pub use client::ZohoHttpClient;
