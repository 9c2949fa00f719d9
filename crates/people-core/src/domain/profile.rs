//! User profile fetched from the upstream employee directory

use serde::{Deserialize, Serialize};

/// Profile fields merged into a session by enrichment. Everything except
/// the email is optional because the employee record is free-form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub zoho_id: Option<String>,
    pub name: Option<String>,
    pub email: String,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub date_of_joining: Option<String>,
    pub status: Option<String>,
}
