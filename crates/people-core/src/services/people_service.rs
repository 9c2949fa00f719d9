// ============================================================================
// People Core - Gateway Service
// File: crates/people-core/src/services/people_service.rs
// ============================================================================
//! Gateway operations: resolve session, resolve employee, forward upstream

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::domain::{AttendanceQuery, DateRange, LeaveRequest, Session, SessionPatch};
use crate::error::DomainError;
use crate::repositories::SessionStore;
use crate::upstream::ZohoApi;

/// Stateless gateway over the HR API. Each operation is independent; the
/// only shared state it touches is the session lookup.
pub struct PeopleService<S: SessionStore, Z: ZohoApi> {
    store: Arc<S>,
    zoho: Arc<Z>,
}

impl<S: SessionStore, Z: ZohoApi> PeopleService<S, Z> {
    pub fn new(store: Arc<S>, zoho: Arc<Z>) -> Self {
        Self { store, zoho }
    }

    async fn resolve_session(&self, session_id: &str) -> Result<Session, DomainError> {
        self.store
            .get(session_id)
            .await
            .ok_or(DomainError::SessionNotFound)
    }

    fn employee_id(session: &Session) -> Result<String, DomainError> {
        session
            .employee_id()
            .map(String::from)
            .ok_or(DomainError::MissingEmployeeId)
    }

    /// One-shot refresh after an upstream 401. Returns the session with the
    /// new access token, or the original error when no refresh token exists
    /// or the refresh itself fails. Never retries more than once.
    async fn refresh_session(
        &self,
        mut session: Session,
        err: DomainError,
    ) -> Result<Session, DomainError> {
        let Some(refresh) = session.refresh_token.clone() else {
            return Err(err);
        };
        warn!(
            "Upstream rejected access token for session {}, refreshing",
            session.id
        );
        let token = match self.zoho.refresh_token(&refresh).await {
            Ok(token) => token,
            Err(refresh_err) => {
                error!(
                    "Token refresh failed for session {}: {}",
                    session.id, refresh_err
                );
                return Err(err);
            }
        };
        self.store
            .update(
                &session.id,
                SessionPatch {
                    access_token: Some(token.access_token.clone()),
                    refresh_token: token.refresh_token.clone(),
                    ..Default::default()
                },
            )
            .await;
        session.access_token = token.access_token;
        if let Some(refresh_token) = token.refresh_token {
            session.refresh_token = Some(refresh_token);
        }
        Ok(session)
    }

    /// Leave records for the session's employee. `None` defaults to
    /// year-to-date.
    pub async fn leaves(
        &self,
        session_id: &str,
        range: Option<DateRange>,
    ) -> Result<Value, DomainError> {
        let session = self.resolve_session(session_id).await?;
        let employee_id = Self::employee_id(&session)?;
        let range = range.unwrap_or_else(DateRange::year_to_date);
        info!("Fetching leave records from {} to {}", range.from, range.to);

        match self
            .zoho
            .leaves(&session.api_domain, &session.access_token, &range, &employee_id)
            .await
        {
            Err(e) if e.is_unauthorized() => {
                let session = self.refresh_session(session, e).await?;
                self.zoho
                    .leaves(&session.api_domain, &session.access_token, &range, &employee_id)
                    .await
            }
            other => other,
        }
    }

    /// Submit a leave application for the session's employee.
    pub async fn apply_leave(
        &self,
        session_id: &str,
        request: LeaveRequest,
    ) -> Result<Value, DomainError> {
        let session = self.resolve_session(session_id).await?;
        let employee_id = Self::employee_id(&session)?;
        let application = request.validated()?.into_application(employee_id);
        info!("Applying leave for employee {}", application.employee_id);

        match self
            .zoho
            .apply_leave(&session.api_domain, &session.access_token, &application)
            .await
        {
            Err(e) if e.is_unauthorized() => {
                let session = self.refresh_session(session, e).await?;
                self.zoho
                    .apply_leave(&session.api_domain, &session.access_token, &application)
                    .await
            }
            other => other,
        }
    }

    /// Cancel a leave record. Session-scoped; no employee id needed.
    pub async fn cancel_leave(
        &self,
        session_id: &str,
        record_id: &str,
    ) -> Result<Value, DomainError> {
        let session = self.resolve_session(session_id).await?;
        info!("Cancelling leave record {}", record_id);

        match self
            .zoho
            .cancel_leave(&session.api_domain, &session.access_token, record_id)
            .await
        {
            Err(e) if e.is_unauthorized() => {
                let session = self.refresh_session(session, e).await?;
                self.zoho
                    .cancel_leave(&session.api_domain, &session.access_token, record_id)
                    .await
            }
            other => other,
        }
    }

    /// Attendance report. Employee id and email are forwarded only when
    /// the profile carries them.
    pub async fn attendance(
        &self,
        session_id: &str,
        sdate: NaiveDate,
        edate: NaiveDate,
    ) -> Result<Value, DomainError> {
        let session = self.resolve_session(session_id).await?;
        let query = AttendanceQuery {
            sdate,
            edate,
            emp_id: session.employee_id().map(String::from),
            email_id: session.user_info.as_ref().map(|info| info.email.clone()),
        };
        info!("Fetching attendance from {} to {}", query.sdate, query.edate);

        match self
            .zoho
            .attendance(&session.api_domain, &session.access_token, &query)
            .await
        {
            Err(e) if e.is_unauthorized() => {
                let session = self.refresh_session(session, e).await?;
                self.zoho
                    .attendance(&session.api_domain, &session.access_token, &query)
                    .await
            }
            other => other,
        }
    }

    /// Per-type leave balances for the session's employee.
    pub async fn user_report(&self, session_id: &str) -> Result<Value, DomainError> {
        let session = self.resolve_session(session_id).await?;
        let employee_id = Self::employee_id(&session)?;
        info!("Fetching user leave report for {}", employee_id);

        match self
            .zoho
            .user_report(&session.api_domain, &session.access_token, &employee_id)
            .await
        {
            Err(e) if e.is_unauthorized() => {
                let session = self.refresh_session(session, e).await?;
                self.zoho
                    .user_report(&session.api_domain, &session.access_token, &employee_id)
                    .await
            }
            other => other,
        }
    }
}
