// ============================================================================
// People API - Gateway Handlers
// File: crates/people-api/src/handlers/people.rs
// ============================================================================
//! Leave, attendance, and report handlers
//!
//! Proxied payloads are returned as the upstream sent them; no shape
//! translation happens here.

use axum::{
    extract::{Extension, Path, Query},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use people_core::domain::{DateRange, LeaveRequest};
use people_core::repositories::SessionStore;
use people_core::services::PeopleService;
use people_core::upstream::ZohoApi;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LeavesParams {
    pub session_id: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct AttendanceParams {
    pub session_id: String,
    pub sdate: NaiveDate,
    pub edate: NaiveDate,
}

/// GET /api/leaves?session_id=[&from=][&to=]
pub async fn leaves<S, Z>(
    Extension(people): Extension<Arc<PeopleService<S, Z>>>,
    Query(params): Query<LeavesParams>,
) -> Result<Json<Value>, ApiError>
where
    S: SessionStore + 'static,
    Z: ZohoApi + 'static,
{
    let range = match (params.from, params.to) {
        (Some(from), Some(to)) => Some(DateRange::new(from, to)?),
        (None, None) => None,
        _ => {
            return Err(ApiError::BadRequest(
                "from and to must be provided together".to_string(),
            ))
        }
    };
    let payload = people.leaves(&params.session_id, range).await?;
    Ok(Json(payload))
}

/// POST /api/leave/apply?session_id=
pub async fn apply_leave<S, Z>(
    Extension(people): Extension<Arc<PeopleService<S, Z>>>,
    Query(params): Query<SessionQuery>,
    Json(request): Json<LeaveRequest>,
) -> Result<Json<Value>, ApiError>
where
    S: SessionStore + 'static,
    Z: ZohoApi + 'static,
{
    let payload = people.apply_leave(&params.session_id, request).await?;
    Ok(Json(payload))
}

/// POST /api/leave/delete/{record_id}?session_id=
pub async fn cancel_leave<S, Z>(
    Extension(people): Extension<Arc<PeopleService<S, Z>>>,
    Path(record_id): Path<String>,
    Query(params): Query<SessionQuery>,
) -> Result<Json<Value>, ApiError>
where
    S: SessionStore + 'static,
    Z: ZohoApi + 'static,
{
    let payload = people.cancel_leave(&params.session_id, &record_id).await?;
    Ok(Json(payload))
}

/// GET /api/attendance?session_id=&sdate=&edate=
pub async fn attendance<S, Z>(
    Extension(people): Extension<Arc<PeopleService<S, Z>>>,
    Query(params): Query<AttendanceParams>,
) -> Result<Json<Value>, ApiError>
where
    S: SessionStore + 'static,
    Z: ZohoApi + 'static,
{
    let payload = people
        .attendance(&params.session_id, params.sdate, params.edate)
        .await?;
    Ok(Json(payload))
}

/// GET /api/user/report?session_id=
pub async fn user_report<S, Z>(
    Extension(people): Extension<Arc<PeopleService<S, Z>>>,
    Query(params): Query<SessionQuery>,
) -> Result<Json<Value>, ApiError>
where
    S: SessionStore + 'static,
    Z: ZohoApi + 'static,
{
    let payload = people.user_report(&params.session_id).await?;
    Ok(Json(payload))
}
