//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{DEFAULT_ACCOUNTS_URL, DEFAULT_API_DOMAIN, DEFAULT_SNAPSHOT_PATH};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub zoho: ZohoSettings,
    pub store: StoreSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    /// Where the OAuth callback redirects after a session is created.
    pub frontend_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ZohoSettings {
    // No defaults: loading fails without these three.
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,

    pub accounts_url: String,
    /// Region used when the token response names no recognised API domain.
    pub default_api_domain: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    pub path: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8002)?
            .set_default("app.name", "people-server")?
            .set_default("app.frontend_url", "http://localhost:8501")?
            .set_default("zoho.accounts_url", DEFAULT_ACCOUNTS_URL)?
            .set_default("zoho.default_api_domain", DEFAULT_API_DOMAIN)?
            .set_default("store.path", DEFAULT_SNAPSHOT_PATH)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        config.try_deserialize()
    }
}
