//! Outbound mail configuration

use serde::{Deserialize, Serialize};

fn default_from_name() -> String {
    String::from("Critica")
}

/// Configuration for the HTTP mail delivery provider
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Provider API endpoint for sending messages
    pub api_url: String,

    /// Provider API key
    pub api_key: String,

    /// Address used in the From header
    pub from_address: String,

    /// Display name used in the From header
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            api_key: String::new(),
            from_address: String::from("noreply@critica.local"),
            from_name: default_from_name(),
        }
    }
}

impl MailConfig {
    /// Read the mail configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: std::env::var("MAIL_API_URL").unwrap_or(defaults.api_url),
            api_key: std::env::var("MAIL_API_KEY").unwrap_or(defaults.api_key),
            from_address: std::env::var("MAIL_FROM_ADDRESS").unwrap_or(defaults.from_address),
            from_name: std::env::var("MAIL_FROM_NAME").unwrap_or(defaults.from_name),
        }
    }

    /// Whether a real provider is configured; when false the application
    /// falls back to the console mailer.
    pub fn is_configured(&self) -> bool {
        !self.api_url.is_empty() && !self.api_key.is_empty()
    }
}
