//! Leave listing and application inputs

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::DomainError;

/// Inclusive date range for leave listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, DomainError> {
        if from > to {
            return Err(DomainError::Validation(format!(
                "from date {} is after to date {}",
                from, to
            )));
        }
        Ok(Self { from, to })
    }

    /// January 1st of the current year through today (UTC). The default
    /// window for leave listings.
    pub fn year_to_date() -> Self {
        let today = Utc::now().date_naive();
        let start_of_year = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
        Self {
            from: start_of_year,
            to: today,
        }
    }
}

/// Structured leave-application input, validated before anything is sent
/// upstream.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LeaveRequest {
    #[validate(length(min = 1, max = 100, message = "Leave type must be between 1 and 100 characters"))]
    pub leave_type: String,

    pub from_date: NaiveDate,
    pub to_date: NaiveDate,

    #[validate(length(min = 1, max = 500, message = "Reason must be between 1 and 500 characters"))]
    pub reason: String,
}

impl LeaveRequest {
    pub fn validated(self) -> Result<Self, DomainError> {
        self.validate()
            .map_err(|e| DomainError::Validation(e.to_string()))?;
        if self.from_date > self.to_date {
            return Err(DomainError::Validation(format!(
                "from date {} is after to date {}",
                self.from_date, self.to_date
            )));
        }
        Ok(self)
    }

    /// Bind the request to an employee, producing the upstream wire shape.
    pub fn into_application(self, employee_id: String) -> LeaveApplication {
        LeaveApplication {
            employee_id,
            leave_type: self.leave_type,
            from_date: self.from_date.to_string(),
            to_date: self.to_date.to_string(),
            reason: self.reason,
        }
    }
}

/// The `inputData` payload the upstream leave form expects (camelCase keys).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveApplication {
    pub employee_id: String,
    pub leave_type: String,
    pub from_date: String,
    pub to_date: String,
    pub reason: String,
}
