//! Upstream Zoho API trait (port)

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{AttendanceQuery, DateRange, LeaveApplication, UserProfile};
use crate::error::DomainError;

/// Token endpoint response. `api_domain` is Zoho's non-standard extra
/// field naming the regional API host.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub api_domain: Option<String>,
}

/// Seam to the external HR API. Services depend on this trait so tests can
/// substitute a double for the HTTP client.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ZohoApi: Send + Sync {
    /// The authorization URL the user is sent to.
    fn authorize_url(&self) -> Result<String, DomainError>;

    /// Exchange an authorization code for tokens. Non-success responses
    /// are fatal for this call; no retry.
    async fn exchange_code(&self, code: &str) -> Result<TokenResponse, DomainError>;

    /// Obtain a fresh access token from a refresh token.
    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenResponse, DomainError>;

    /// Two-step enrichment: account email, then the employee record.
    async fn fetch_user_info(
        &self,
        api_domain: &str,
        access_token: &str,
    ) -> Result<UserProfile, DomainError>;

    async fn leaves(
        &self,
        api_domain: &str,
        access_token: &str,
        range: &DateRange,
        employee_id: &str,
    ) -> Result<Value, DomainError>;

    async fn apply_leave(
        &self,
        api_domain: &str,
        access_token: &str,
        application: &LeaveApplication,
    ) -> Result<Value, DomainError>;

    async fn cancel_leave(
        &self,
        api_domain: &str,
        access_token: &str,
        record_id: &str,
    ) -> Result<Value, DomainError>;

    async fn attendance(
        &self,
        api_domain: &str,
        access_token: &str,
        query: &AttendanceQuery,
    ) -> Result<Value, DomainError>;

    async fn user_report(
        &self,
        api_domain: &str,
        access_token: &str,
        employee_id: &str,
    ) -> Result<Value, DomainError>;
}
