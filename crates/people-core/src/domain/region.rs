//! API region resolution

/// Regions with a known People API base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiRegion {
    In,
    Com,
}

impl ApiRegion {
    pub fn base_url(&self) -> &'static str {
        match self {
            ApiRegion::In => "https://people.zoho.in",
            ApiRegion::Com => "https://people.zoho.com",
        }
    }

    /// Match the issuer-returned domain against known regional suffixes.
    pub fn from_issuer_domain(raw: &str) -> Option<Self> {
        if raw.contains("zohoapis.in") {
            Some(ApiRegion::In)
        } else if raw.contains("zohoapis.com") {
            Some(ApiRegion::Com)
        } else {
            None
        }
    }
}

/// Resolve the People API base URL from the token response's `api_domain`.
/// Unmatched values fall back to the configured default region; this is
/// policy, not an error.
pub fn resolve_api_domain(raw: &str, default_api_domain: &str) -> String {
    match ApiRegion::from_issuer_domain(raw) {
        Some(region) => region.base_url().to_string(),
        None => default_api_domain.to_string(),
    }
}
