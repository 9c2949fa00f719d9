// ============================================================================
// People Core - OAuth Service
// File: crates/people-core/src/services/oauth_service.rs
// ============================================================================
//! OAuth code exchange, session creation, and profile enrichment

use std::sync::Arc;

use tracing::{error, info};

use people_shared::SessionId;

use crate::domain::{resolve_api_domain, EnrichmentStatus, SessionCredentials, SessionPatch};
use crate::error::DomainError;
use crate::repositories::SessionStore;
use crate::upstream::ZohoApi;

/// Handles the login-url / callback / logout flow.
pub struct OAuthService<S: SessionStore, Z: ZohoApi> {
    store: Arc<S>,
    zoho: Arc<Z>,
    default_api_domain: String,
}

impl<S: SessionStore, Z: ZohoApi> OAuthService<S, Z> {
    pub fn new(store: Arc<S>, zoho: Arc<Z>, default_api_domain: String) -> Self {
        Self {
            store,
            zoho,
            default_api_domain,
        }
    }

    /// Issue the authorization URL the user is redirected to.
    pub fn login_url(&self) -> Result<String, DomainError> {
        self.zoho.authorize_url()
    }

    /// Exchange an authorization code for a session.
    ///
    /// The session is created as soon as the token exchange succeeds,
    /// BEFORE enrichment, so a partially authenticated user is never
    /// locked out by a failing profile fetch.
    pub async fn handle_callback(&self, code: &str) -> Result<SessionId, DomainError> {
        info!("Exchanging auth code for access token...");

        // 1. Exchange code for tokens. Failures propagate, no retry.
        let token = self.zoho.exchange_code(code).await?;

        // 2. Determine API domain
        let api_domain = resolve_api_domain(
            token.api_domain.as_deref().unwrap_or(""),
            &self.default_api_domain,
        );

        // 3. Save session immediately
        let session = self
            .store
            .create(SessionCredentials {
                access_token: token.access_token.clone(),
                refresh_token: token.refresh_token,
                scope: token.scope,
                api_domain: api_domain.clone(),
            })
            .await;
        info!("Session saved: {}", session.id);

        // 4. Fetch user info. Optional; doesn't block session creation.
        match self.zoho.fetch_user_info(&api_domain, &token.access_token).await {
            Ok(profile) => {
                info!("User info fetched for session {}", session.id);
                self.store
                    .update(
                        &session.id,
                        SessionPatch {
                            user_info: Some(profile),
                            enrichment: Some(EnrichmentStatus::Enriched),
                            ..Default::default()
                        },
                    )
                    .await;
            }
            Err(e) => {
                // Session already saved; the user stays logged in without a profile.
                error!("Failed to fetch user info: {}", e);
                self.store
                    .update(
                        &session.id,
                        SessionPatch {
                            enrichment: Some(EnrichmentStatus::Degraded),
                            ..Default::default()
                        },
                    )
                    .await;
            }
        }

        Ok(session.id)
    }

    /// Remove the session from memory and the snapshot.
    pub async fn logout(&self, session_id: &str) -> bool {
        self.store.delete(session_id).await
    }
}
