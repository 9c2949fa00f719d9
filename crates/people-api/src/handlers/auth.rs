// ============================================================================
// People API - Auth Handlers
// File: crates/people-api/src/handlers/auth.rs
// ============================================================================
//! Authentication HTTP handlers (login URL, callback, logout)

use axum::{
    extract::{Extension, Query},
    response::Redirect,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use people_core::repositories::SessionStore;
use people_core::services::OAuthService;
use people_core::upstream::ZohoApi;

use crate::error::ApiError;
use crate::router::ApiContext;

#[derive(Debug, Serialize)]
pub struct AuthUrlResponse {
    pub auth_url: String,
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub status: String,
    pub message: String,
}

/// GET /auth/zoho/login
pub async fn login<S, Z>(
    Extension(oauth): Extension<Arc<OAuthService<S, Z>>>,
) -> Result<Json<AuthUrlResponse>, ApiError>
where
    S: SessionStore + 'static,
    Z: ZohoApi + 'static,
{
    let auth_url = oauth.login_url()?;
    Ok(Json(AuthUrlResponse { auth_url }))
}

/// GET /auth/zoho/callback?code=
///
/// Redirects to the frontend with the new session id as a query parameter.
pub async fn callback<S, Z>(
    Extension(oauth): Extension<Arc<OAuthService<S, Z>>>,
    Extension(context): Extension<ApiContext>,
    Query(params): Query<CallbackParams>,
) -> Result<Redirect, ApiError>
where
    S: SessionStore + 'static,
    Z: ZohoApi + 'static,
{
    let session_id = oauth.handle_callback(&params.code).await?;
    let url = format!("{}/?session_id={}", context.frontend_url, session_id);
    Ok(Redirect::temporary(&url))
}

/// GET /auth/zoho/logout?session_id=
pub async fn logout<S, Z>(
    Extension(oauth): Extension<Arc<OAuthService<S, Z>>>,
    Query(params): Query<SessionQuery>,
) -> Result<Json<LogoutResponse>, ApiError>
where
    S: SessionStore + 'static,
    Z: ZohoApi + 'static,
{
    if oauth.logout(&params.session_id).await {
        Ok(Json(LogoutResponse {
            status: "ok".to_string(),
            message: "Session cleared successfully.".to_string(),
        }))
    } else {
        Err(ApiError::NotFound("Session not found".to_string()))
    }
}
