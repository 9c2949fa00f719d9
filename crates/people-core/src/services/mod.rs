//! Domain services

pub mod oauth_service;
pub mod people_service;

pub use oauth_service::OAuthService;
pub use people_service::PeopleService;
