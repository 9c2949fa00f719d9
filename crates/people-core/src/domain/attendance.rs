//! Attendance report query

use chrono::NaiveDate;

/// Parameters for the attendance user report. Employee id and email are
/// forwarded only when the session profile carries them.
#[derive(Debug, Clone)]
pub struct AttendanceQuery {
    pub sdate: NaiveDate,
    pub edate: NaiveDate,
    pub emp_id: Option<String>,
    pub email_id: Option<String>,
}
