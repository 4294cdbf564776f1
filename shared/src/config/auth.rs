//! Authentication configuration: JWT signing and confirmation codes

use serde::{Deserialize, Serialize};

/// Authentication and token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Secret used to sign access tokens (HS256)
    pub jwt_secret: String,

    /// Access token lifetime in minutes
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_minutes: i64,

    /// Server-side secret mixed into confirmation-code derivation
    pub confirmation_secret: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::from("insecure-dev-jwt-secret"),
            access_token_expiry_minutes: default_access_token_expiry(),
            confirmation_secret: String::from("insecure-dev-confirmation-secret"),
        }
    }
}

impl AuthConfig {
    /// Read the auth configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            jwt_secret: std::env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            access_token_expiry_minutes: std::env::var("ACCESS_TOKEN_EXPIRY_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.access_token_expiry_minutes),
            confirmation_secret: std::env::var("CONFIRMATION_SECRET")
                .unwrap_or(defaults.confirmation_secret),
        }
    }
}

fn default_access_token_expiry() -> i64 {
    60
}
