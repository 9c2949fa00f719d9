//! Zoho HTTP client
//!
//! reqwest adapter for the [`ZohoApi`] port. Token calls run without a
//! timeout; profile lookups get 20s and HR calls 30s, set per request so
//! the shared client carries no global deadline.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{error, info};

use people_core::domain::{AttendanceQuery, DateRange, LeaveApplication, UserProfile};
use people_core::error::DomainError;
use people_core::upstream::{TokenResponse, ZohoApi};
use people_shared::config::ZohoSettings;
use people_shared::constants::{HR_API_TIMEOUT_SECS, OAUTH_SCOPES, PROFILE_TIMEOUT_SECS};
use people_shared::utils::mask_email;

pub struct ZohoHttpClient {
    client: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    accounts_url: String,
}

impl ZohoHttpClient {
    pub fn new(settings: &ZohoSettings) -> Self {
        Self {
            client: Client::builder().build().unwrap_or_else(|_| Client::new()),
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
            redirect_uri: settings.redirect_uri.clone(),
            accounts_url: settings.accounts_url.clone(),
        }
    }

    fn auth_header(access_token: &str) -> (&'static str, String) {
        ("Authorization", format!("Zoho-oauthtoken {}", access_token))
    }

    /// Zoho accepts grant parameters as query parameters on the token
    /// endpoint; both token calls go through here. No timeout.
    async fn token_request(&self, params: &[(&str, &str)]) -> Result<TokenResponse, DomainError> {
        let url = format!("{}/oauth/v2/token", self.accounts_url);
        let response = self
            .client
            .post(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| DomainError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!("Token endpoint error ({}): {}", status, text);
            return Err(DomainError::Upstream {
                status: status.as_u16(),
                message: text,
            });
        }
        // Zoho can answer 200 with an error body; the missing access_token
        // surfaces here as a parse failure.
        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| DomainError::Internal(format!("Malformed token response: {}", e)))
    }
}

async fn read_json(response: reqwest::Response, what: &str) -> Result<Value, DomainError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        error!("{} failed: {} - {}", what, status, text);
        return Err(DomainError::Upstream {
            status: status.as_u16(),
            message: text,
        });
    }
    response
        .json::<Value>()
        .await
        .map_err(|e| DomainError::Internal(format!("Malformed {} response: {}", what, e)))
}

/// Employee-view values arrive as strings or numbers; EMPLOYEEID in
/// particular is numeric for some tenants.
fn field_string(record: &Value, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[async_trait]
impl ZohoApi for ZohoHttpClient {
    fn authorize_url(&self) -> Result<String, DomainError> {
        let url = Url::parse_with_params(
            &format!("{}/oauth/v2/auth", self.accounts_url),
            &[
                ("scope", OAUTH_SCOPES.join(",")),
                ("client_id", self.client_id.clone()),
                ("response_type", "code".to_string()),
                ("access_type", "offline".to_string()),
                ("redirect_uri", self.redirect_uri.clone()),
            ],
        )
        .map_err(|e| DomainError::Internal(format!("Invalid accounts URL: {}", e)))?;
        Ok(url.to_string())
    }

    async fn exchange_code(&self, code: &str) -> Result<TokenResponse, DomainError> {
        self.token_request(&[
            ("grant_type", "authorization_code"),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("redirect_uri", &self.redirect_uri),
            ("code", code),
        ])
        .await
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenResponse, DomainError> {
        info!("Refreshing Zoho access token...");
        self.token_request(&[
            ("grant_type", "refresh_token"),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    async fn fetch_user_info(
        &self,
        api_domain: &str,
        access_token: &str,
    ) -> Result<UserProfile, DomainError> {
        let (header, value) = Self::auth_header(access_token);

        // 1. The account email comes from Zoho Accounts, not People.
        let info_url = format!("{}/oauth/user/info", self.accounts_url);
        let response = self
            .client
            .get(&info_url)
            .header(header, &value)
            .timeout(Duration::from_secs(PROFILE_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| DomainError::Transport(e.to_string()))?;
        let data = read_json(response, "User info fetch").await?;

        let email = data
            .get("Email")
            .or_else(|| data.get("email"))
            .or_else(|| data.get("useremail"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                DomainError::Internal("Email not found in user info response".to_string())
            })?
            .to_string();
        info!("Logged-in email: {}", mask_email(&email));

        // 2. Look up the employee record by that email.
        let employee_url = format!("{}/people/api/forms/P_EmployeeView/records", api_domain);
        let response = self
            .client
            .get(&employee_url)
            .header(header, &value)
            .query(&[
                ("searchColumn", "EMPLOYEEMAILALIASs"),
                ("searchValue", email.as_str()),
            ])
            .timeout(Duration::from_secs(PROFILE_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| DomainError::Transport(e.to_string()))?;
        let data = read_json(response, "Employee record fetch").await?;

        let record = data
            .get("data")
            .and_then(Value::as_array)
            .and_then(|records| records.first())
            .ok_or_else(|| {
                DomainError::Internal(format!(
                    "No employee record found for {}",
                    mask_email(&email)
                ))
            })?;

        Ok(UserProfile {
            zoho_id: field_string(record, "EMPLOYEEID"),
            name: field_string(record, "FULLNAME"),
            email,
            department: field_string(record, "DEPARTMENTNAME"),
            designation: field_string(record, "DESIGNATION"),
            role: field_string(record, "ROLE"),
            location: field_string(record, "LOCATION"),
            date_of_joining: field_string(record, "DATEOFJOIN"),
            status: field_string(record, "EMPLOYEESTATUS"),
        })
    }

    async fn leaves(
        &self,
        api_domain: &str,
        access_token: &str,
        range: &DateRange,
        employee_id: &str,
    ) -> Result<Value, DomainError> {
        let url = format!("{}/api/v2/leavetracker/leaves/records", api_domain);
        let (header, value) = Self::auth_header(access_token);
        let response = self
            .client
            .get(&url)
            .header(header, value)
            .query(&[
                ("from", range.from.to_string()),
                ("to", range.to.to_string()),
                ("employeeId", employee_id.to_string()),
            ])
            .timeout(Duration::from_secs(HR_API_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| DomainError::Transport(e.to_string()))?;
        read_json(response, "Leaves fetch").await
    }

    async fn apply_leave(
        &self,
        api_domain: &str,
        access_token: &str,
        application: &LeaveApplication,
    ) -> Result<Value, DomainError> {
        let url = format!("{}/people/api/forms/json/Leave/insertRecord", api_domain);
        let input_data = serde_json::to_string(application)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let (header, value) = Self::auth_header(access_token);
        // The leave form expects the JSON payload in an `inputData` query
        // parameter, not the request body.
        let response = self
            .client
            .post(&url)
            .header(header, value)
            .query(&[("inputData", input_data.as_str())])
            .timeout(Duration::from_secs(HR_API_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| DomainError::Transport(e.to_string()))?;
        read_json(response, "Leave apply").await
    }

    async fn cancel_leave(
        &self,
        api_domain: &str,
        access_token: &str,
        record_id: &str,
    ) -> Result<Value, DomainError> {
        let url = format!(
            "{}/people/api/v2/leavetracker/leaves/records/cancel/{}",
            api_domain, record_id
        );
        let (header, value) = Self::auth_header(access_token);
        let response = self
            .client
            .post(&url)
            .header(header, value)
            .timeout(Duration::from_secs(HR_API_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| DomainError::Transport(e.to_string()))?;
        read_json(response, "Leave cancel").await
    }

    async fn attendance(
        &self,
        api_domain: &str,
        access_token: &str,
        query: &AttendanceQuery,
    ) -> Result<Value, DomainError> {
        let url = format!("{}/people/api/attendance/getUserReport", api_domain);
        let mut params = vec![
            ("sdate", query.sdate.to_string()),
            ("edate", query.edate.to_string()),
        ];
        if let Some(emp_id) = &query.emp_id {
            params.push(("empId", emp_id.clone()));
        }
        if let Some(email_id) = &query.email_id {
            params.push(("emailId", email_id.clone()));
        }
        let (header, value) = Self::auth_header(access_token);
        let response = self
            .client
            .get(&url)
            .header(header, value)
            .query(&params)
            .timeout(Duration::from_secs(HR_API_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| DomainError::Transport(e.to_string()))?;
        read_json(response, "Attendance fetch").await
    }

    async fn user_report(
        &self,
        api_domain: &str,
        access_token: &str,
        employee_id: &str,
    ) -> Result<Value, DomainError> {
        let url = format!("{}/people/api/v2/leavetracker/reports/user", api_domain);
        let (header, value) = Self::auth_header(access_token);
        let response = self
            .client
            .get(&url)
            .header(header, value)
            .query(&[("employee", employee_id)])
            .timeout(Duration::from_secs(HR_API_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| DomainError::Transport(e.to_string()))?;
        read_json(response, "User report fetch").await
    }
}
