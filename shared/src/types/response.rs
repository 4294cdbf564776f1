//! Standard API response bodies
//!
//! Two error shapes exist on the wire:
//! - field-scoped validation failures serialize as a bare map of
//!   `{"field": ["reason", ...]}` so clients can attach messages to inputs;
//! - everything else uses [`ErrorResponse`] with a machine-readable code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Map of field name to the list of validation messages for that field
pub type FieldErrors = HashMap<String, Vec<String>>;

/// Unified error body for non-field-scoped failures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Build a single-field error map
pub fn field_error(field: impl Into<String>, message: impl Into<String>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert(field.into(), vec![message.into()]);
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_error_builds_singleton_map() {
        let errors = field_error("username", "already taken");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["username"], vec!["already taken".to_string()]);
    }

    #[test]
    fn error_response_serializes_code_and_message() {
        let body = ErrorResponse::new("NOT_FOUND", "title not found");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "NOT_FOUND");
        assert_eq!(json["message"], "title not found");
    }
}
