//! Router assembly

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use people_core::repositories::SessionStore;
use people_core::services::{OAuthService, PeopleService};
use people_core::upstream::ZohoApi;

use crate::handlers;

/// Request-scoped context shared with handlers.
#[derive(Clone)]
pub struct ApiContext {
    pub frontend_url: String,
}

/// Build the HTTP surface. Generic over the two ports so the binary wires
/// the file store and HTTP client while tests wire in-memory doubles.
pub fn build_router<S, Z>(
    oauth: Arc<OAuthService<S, Z>>,
    people: Arc<PeopleService<S, Z>>,
    context: ApiContext,
) -> Router
where
    S: SessionStore + 'static,
    Z: ZohoApi + 'static,
{
    Router::new()
        .route("/health", get(handlers::health::health_check))
        // Auth
        .route("/auth/zoho/login", get(handlers::auth::login::<S, Z>))
        .route("/auth/zoho/callback", get(handlers::auth::callback::<S, Z>))
        .route("/auth/zoho/logout", get(handlers::auth::logout::<S, Z>))
        // Gateway
        .route("/api/leaves", get(handlers::people::leaves::<S, Z>))
        .route("/api/leave/apply", post(handlers::people::apply_leave::<S, Z>))
        .route(
            "/api/leave/delete/{record_id}",
            post(handlers::people::cancel_leave::<S, Z>),
        )
        .route("/api/attendance", get(handlers::people::attendance::<S, Z>))
        .route("/api/user/report", get(handlers::people::user_report::<S, Z>))
        // Shared state
        .layer(Extension(oauth))
        .layer(Extension(people))
        .layer(Extension(context))
        // CORS: the frontend is a separate origin
        .layer(CorsLayer::permissive())
        // Tracing
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
