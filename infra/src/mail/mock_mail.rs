//! Mock mail service for development and testing.
//!
//! Logs messages instead of sending them and records everything it was
//! asked to deliver so tests can assert on it.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;
use uuid::Uuid;

use cr_core::services::notification::Mailer;

/// A message captured by the mock service
#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mock mail service for development and testing
#[derive(Clone, Default)]
pub struct MockMailService {
    message_count: Arc<AtomicU64>,
    sent: Arc<Mutex<Vec<SentMail>>>,
    simulate_failure: bool,
}

impl MockMailService {
    /// Create a new mock mail service
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that fails every send (for testing failure paths)
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::default()
        }
    }

    /// Get the total number of messages sent
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Everything delivered so far
    pub fn sent_messages(&self) -> Vec<SentMail> {
        self.sent.lock().expect("mail log poisoned").clone()
    }

    /// The most recently delivered message, if any
    pub fn last_message(&self) -> Option<SentMail> {
        self.sent.lock().expect("mail log poisoned").last().cloned()
    }
}

#[async_trait]
impl Mailer for MockMailService {
    async fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<String, String> {
        if !to.contains('@') {
            return Err(format!("Invalid recipient address: {to}"));
        }
        if self.simulate_failure {
            return Err("Simulated mail failure".to_string());
        }

        let message_id = Uuid::new_v4().to_string();
        self.message_count.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().expect("mail log poisoned").push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });

        info!(to = %to, subject = %subject, message_id = %message_id, "mock mail delivered");
        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
