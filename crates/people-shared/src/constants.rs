//! Application-wide constants

/// OAuth scopes requested when issuing a login URL.
pub const OAUTH_SCOPES: &[&str] = &[
    "AaaServer.profile.READ",
    "ZohoPeople.employee.READ",
    "ZohoPeople.leave.ALL",
    "ZohoPeople.attendance.READ",
    "ZohoAssist.userapi.READ",
    "ZohoPeople.forms.ALL",
];

pub const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.zoho.in";
pub const DEFAULT_API_DOMAIN: &str = "https://people.zoho.in";
pub const DEFAULT_SNAPSHOT_PATH: &str = "sessions.json";

/// Timeout for profile lookups during enrichment.
pub const PROFILE_TIMEOUT_SECS: u64 = 20;
/// Timeout for leave, attendance, and report calls.
pub const HR_API_TIMEOUT_SECS: u64 = 30;
