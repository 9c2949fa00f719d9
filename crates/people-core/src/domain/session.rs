//! Session domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use people_shared::{new_session_id, SessionId};

use crate::domain::profile::UserProfile;

/// Outcome of the post-authorization profile enrichment step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrichmentStatus {
    Pending,
    Enriched,
    Degraded,
}

impl EnrichmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrichmentStatus::Pending => "pending",
            EnrichmentStatus::Enriched => "enriched",
            EnrichmentStatus::Degraded => "degraded",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(EnrichmentStatus::Pending),
            "enriched" => Some(EnrichmentStatus::Enriched),
            "degraded" => Some(EnrichmentStatus::Degraded),
            _ => None,
        }
    }
}

impl Default for EnrichmentStatus {
    fn default() -> Self {
        EnrichmentStatus::Pending
    }
}

/// A server-side record binding an opaque identifier to OAuth credentials
/// and an optional user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,

    pub access_token: String,
    pub refresh_token: Option<String>,

    /// API base URL resolved at token exchange from the issuer's domain.
    pub api_domain: String,
    pub scope: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_info: Option<UserProfile>,

    #[serde(default)]
    pub enrichment: EnrichmentStatus,

    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(credentials: SessionCredentials) -> Self {
        Self {
            id: new_session_id(),
            access_token: credentials.access_token,
            refresh_token: credentials.refresh_token,
            api_domain: credentials.api_domain,
            scope: credentials.scope,
            user_info: None,
            enrichment: EnrichmentStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Employee identifier for upstream calls. Absent until enrichment
    /// succeeds; employee-scoped operations fail without it.
    pub fn employee_id(&self) -> Option<&str> {
        self.user_info
            .as_ref()
            .and_then(|info| info.zoho_id.as_deref())
    }
}

/// Creation input: credentials obtained from the token endpoint, with the
/// API domain already resolved.
#[derive(Debug, Clone)]
pub struct SessionCredentials {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub api_domain: String,
}

/// Partial update: field-wise "set if Some". `id` and `created_at` are
/// untouchable by merges.
#[derive(Debug, Clone, Default)]
pub struct SessionPatch {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub api_domain: Option<String>,
    pub scope: Option<String>,
    pub user_info: Option<UserProfile>,
    pub enrichment: Option<EnrichmentStatus>,
}

impl SessionPatch {
    pub fn apply(self, session: &mut Session) {
        if let Some(access_token) = self.access_token {
            session.access_token = access_token;
        }
        if let Some(refresh_token) = self.refresh_token {
            session.refresh_token = Some(refresh_token);
        }
        if let Some(api_domain) = self.api_domain {
            session.api_domain = api_domain;
        }
        if let Some(scope) = self.scope {
            session.scope = Some(scope);
        }
        if let Some(user_info) = self.user_info {
            session.user_info = Some(user_info);
        }
        if let Some(enrichment) = self.enrichment {
            session.enrichment = enrichment;
        }
    }
}
