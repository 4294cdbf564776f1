//! Configuration module with business-specific sub-modules
//!
//! Configuration is environment-driven: each sub-config has serde-friendly
//! defaults and a `from_env` constructor that overrides them from process
//! environment variables. The api binary loads a `.env` file before building
//! the [`AppConfig`].

pub mod auth;
pub mod database;
pub mod mail;
pub mod server;

use serde::{Deserialize, Serialize};

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use mail::MailConfig;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Authentication configuration (JWT + confirmation codes)
    #[serde(default)]
    pub auth: AuthConfig,

    /// Outbound mail configuration
    #[serde(default)]
    pub mail: MailConfig,
}

impl AppConfig {
    /// Build the full configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            mail: MailConfig::from_env(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_usable() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert!(!config.database.url.is_empty());
        assert!(config.auth.access_token_expiry_minutes > 0);
    }
}
