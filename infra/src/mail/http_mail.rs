//! Mail delivery through an HTTP provider API.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use cr_core::services::notification::Mailer;
use cr_shared::config::MailConfig;

/// Mail service backed by a JSON send endpoint (Mailgun-style providers)
pub struct HttpMailService {
    client: reqwest::Client,
    config: MailConfig,
}

#[derive(Deserialize)]
struct SendResponse {
    id: Option<String>,
}

impl HttpMailService {
    /// Create a new HTTP mail service
    pub fn new(config: MailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn from_header(&self) -> String {
        format!("{} <{}>", self.config.from_name, self.config.from_address)
    }
}

#[async_trait]
impl Mailer for HttpMailService {
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<String, String> {
        let payload = json!({
            "from": self.from_header(),
            "to": to,
            "subject": subject,
            "text": body,
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| format!("Mail request failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, detail = %detail, "mail provider rejected message");
            return Err(format!("Mail provider returned {status}"));
        }

        let parsed: SendResponse = response
            .json()
            .await
            .unwrap_or(SendResponse { id: None });

        let message_id = parsed
            .id
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        tracing::debug!(to = %to, message_id = %message_id, "mail accepted by provider");
        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "http"
    }
}
