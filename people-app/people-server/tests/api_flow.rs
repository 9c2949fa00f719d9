//! End-to-end tests over the full router with an in-memory session store
//! and a mock upstream.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use people_api::{build_router, ApiContext};
use people_core::services::{OAuthService, PeopleService};
use people_infrastructure::{MemorySessionStore, ZohoHttpClient};
use people_shared::config::ZohoSettings;

/// Router wired against the mock server for both the accounts host and the
/// API domain, so every upstream call lands on the mock.
fn test_app(server: &MockServer) -> Router {
    let settings = ZohoSettings {
        client_id: "client-1".to_string(),
        client_secret: "secret-1".to_string(),
        redirect_uri: "http://localhost:8002/auth/zoho/callback".to_string(),
        accounts_url: server.uri(),
        default_api_domain: server.uri(),
    };
    let store = Arc::new(MemorySessionStore::new());
    let zoho = Arc::new(ZohoHttpClient::new(&settings));
    let oauth = Arc::new(OAuthService::new(
        store.clone(),
        zoho.clone(),
        settings.default_api_domain.clone(),
    ));
    let people = Arc::new(PeopleService::new(store, zoho));
    build_router(
        oauth,
        people,
        ApiContext {
            frontend_url: "http://localhost:8501".to_string(),
        },
    )
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn mount_token_exchange(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth/v2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "T1",
            "refresh_token": "R1",
            "scope": "ZohoPeople.leave.ALL",
            "api_domain": "https://unknown.example"
        })))
        .mount(server)
        .await;
}

async fn mount_enrichment(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/oauth/user/info"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"Email": "someone@example.com"})),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/people/api/forms/P_EmployeeView/records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"EMPLOYEEID": "E1", "FULLNAME": "Someone Example"}]
        })))
        .mount(server)
        .await;
}

/// Run the callback and pull the session id out of the redirect.
async fn login_session(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(get("/auth/zoho/callback?code=code-1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(location.starts_with("http://localhost:8501/?session_id="));
    location.split("session_id=").nth(1).unwrap().to_string()
}

#[tokio::test]
async fn health_reports_healthy() {
    let server = MockServer::start().await;
    let app = test_app(&server);

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn login_issues_the_authorization_url() {
    let server = MockServer::start().await;
    let app = test_app(&server);

    let response = app.oneshot(get("/auth/zoho/login")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let auth_url = body["auth_url"].as_str().unwrap();
    assert!(auth_url.contains("/oauth/v2/auth?"));
    assert!(auth_url.contains("client_id=client-1"));
}

#[tokio::test]
async fn callback_creates_a_usable_session() {
    let server = MockServer::start().await;
    mount_token_exchange(&server).await;
    mount_enrichment(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v2/leavetracker/leaves/records"))
        .and(query_param("employeeId", "E1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"leaves": [{"id": 1}]})))
        .mount(&server)
        .await;

    let app = test_app(&server);
    let session_id = login_session(&app).await;

    let response = app
        .oneshot(get(&format!("/api/leaves?session_id={}", session_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    // Payload passes through unchanged
    assert_eq!(body_json(response).await, json!({"leaves": [{"id": 1}]}));
}

#[tokio::test]
async fn failed_enrichment_degrades_the_session_but_login_succeeds() {
    let server = MockServer::start().await;
    mount_token_exchange(&server).await;
    Mock::given(method("GET"))
        .and(path("/oauth/user/info"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let app = test_app(&server);
    let session_id = login_session(&app).await;

    // Employee-scoped call fails with a missing-identifier error, not a
    // transport error: the upstream is never asked for leaves.
    let response = app
        .oneshot(get(&format!("/api/leaves?session_id={}", session_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "MissingIdentifier");
}

#[tokio::test]
async fn unknown_session_is_unauthorized() {
    let server = MockServer::start().await;
    let app = test_app(&server);

    let response = app
        .oneshot(get("/api/leaves?session_id=no-such-session"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn upstream_status_passes_through_to_the_caller() {
    let server = MockServer::start().await;
    mount_token_exchange(&server).await;
    mount_enrichment(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v2/leavetracker/leaves/records"))
        .respond_with(ResponseTemplate::new(403).set_body_string("scope missing"))
        .mount(&server)
        .await;

    let app = test_app(&server);
    let session_id = login_session(&app).await;

    let response = app
        .oneshot(get(&format!("/api/leaves?session_id={}", session_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn expired_token_is_refreshed_once_and_retried() {
    let server = MockServer::start().await;
    mount_token_exchange(&server).await;
    mount_enrichment(&server).await;
    // First leaves call rejects the stale token, the retry succeeds.
    Mock::given(method("GET"))
        .and(path("/api/v2/leavetracker/leaves/records"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let app = test_app(&server);
    let session_id = login_session(&app).await;

    Mock::given(method("GET"))
        .and(path("/api/v2/leavetracker/leaves/records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"leaves": []})))
        .mount(&server)
        .await;

    let response = app
        .oneshot(get(&format!("/api/leaves?session_id={}", session_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn apply_leave_submits_the_structured_request() {
    let server = MockServer::start().await;
    mount_token_exchange(&server).await;
    mount_enrichment(&server).await;
    Mock::given(method("POST"))
        .and(path("/people/api/forms/json/Leave/insertRecord"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "queued"})))
        .mount(&server)
        .await;

    let app = test_app(&server);
    let session_id = login_session(&app).await;

    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/leave/apply?session_id={}", session_id))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "leave_type": "Casual Leave",
                "from_date": "2026-02-01",
                "to_date": "2026-02-03",
                "reason": "family event"
            })
            .to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"result": "queued"}));
}

#[tokio::test]
async fn invalid_leave_request_is_rejected_before_the_upstream() {
    let server = MockServer::start().await;
    mount_token_exchange(&server).await;
    mount_enrichment(&server).await;

    let app = test_app(&server);
    let session_id = login_session(&app).await;

    // from after to
    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/leave/apply?session_id={}", session_id))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "leave_type": "Casual Leave",
                "from_date": "2026-02-05",
                "to_date": "2026-02-03",
                "reason": "family event"
            })
            .to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn logout_clears_the_session() {
    let server = MockServer::start().await;
    mount_token_exchange(&server).await;
    mount_enrichment(&server).await;

    let app = test_app(&server);
    let session_id = login_session(&app).await;

    let response = app
        .clone()
        .oneshot(get(&format!("/auth/zoho/logout?session_id={}", session_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");

    // The cleared session no longer authorizes gateway calls.
    let response = app
        .oneshot(get(&format!("/api/leaves?session_id={}", session_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_of_unknown_session_is_not_found() {
    let server = MockServer::start().await;
    let app = test_app(&server);

    let response = app
        .oneshot(get("/auth/zoho/logout?session_id=no-such-session"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn mismatched_range_parameters_are_a_bad_request() {
    let server = MockServer::start().await;
    mount_token_exchange(&server).await;
    mount_enrichment(&server).await;

    let app = test_app(&server);
    let session_id = login_session(&app).await;

    let response = app
        .oneshot(get(&format!(
            "/api/leaves?session_id={}&from=2026-01-01",
            session_id
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
