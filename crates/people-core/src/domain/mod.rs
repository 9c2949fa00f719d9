//! Domain entities

pub mod attendance;
pub mod leave;
pub mod profile;
pub mod region;
pub mod session;

pub use attendance::AttendanceQuery;
pub use leave::{DateRange, LeaveApplication, LeaveRequest};
pub use profile::UserProfile;
pub use region::resolve_api_domain;
pub use session::{EnrichmentStatus, Session, SessionCredentials, SessionPatch};
