//! Outbound mail abstraction.
//!
//! The delivery mechanism lives in the infrastructure layer; the domain only
//! knows how to phrase the confirmation message and which seam to hand it to.

use async_trait::async_trait;

/// Subject line used for confirmation code messages
pub const CONFIRMATION_SUBJECT: &str = "Critica confirmation code";

/// Trait for mail delivery integration
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send a mail message
    ///
    /// # Returns
    /// * `Ok(message_id)` - Provider identifier for the sent message
    /// * `Err(reason)` - Delivery failed
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<String, String>;

    /// Get the delivery provider name
    fn provider_name(&self) -> &str;
}

/// Render the body of a confirmation code message
pub fn confirmation_body(username: &str, code: &str) -> String {
    format!(
        "Hello {username},\n\n\
         You are receiving this message because this address was used to\n\
         register at Critica.\n\n\
         Your confirmation code: {code}\n\n\
         Submit it together with your username to obtain an access token.\n\
         If you did not request this code, simply ignore this message.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_carries_name_and_code() {
        let body = confirmation_body("alice", "deadbeef");
        assert!(body.contains("alice"));
        assert!(body.contains("deadbeef"));
    }
}
