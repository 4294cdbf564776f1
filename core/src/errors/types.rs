//! Error type definitions for authentication, token management, and
//! validation. HTTP status mapping happens in the presentation layer.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid confirmation code")]
    InvalidConfirmationCode,

    #[error("User not found")]
    UserNotFound,

    #[error("Insufficient permissions")]
    InsufficientPermissions,
}

/// Token-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Invalid token claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Validation errors. Every variant that concerns a single input names the
/// field so the presentation layer can build field-scoped responses.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field required: {field}")]
    RequiredField { field: String },

    #[error("Invalid format for field: {field}")]
    InvalidFormat { field: String },

    #[error("Value out of range for field: {field} (min: {min}, max: {max})")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("Value too long for field: {field} (max: {max}, actual: {actual})")]
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },

    #[error("Pattern mismatch for field: {field}")]
    PatternMismatch { field: String },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Reserved value for field: {field}")]
    ReservedValue { field: String },

    #[error("Duplicate value for field: {field}")]
    DuplicateValue { field: String },

    #[error("Unknown reference for field: {field}")]
    UnknownReference { field: String },

    #[error("{rule}")]
    BusinessRuleViolation { rule: String },
}

impl ValidationError {
    /// The field this error should be attached to in a field-scoped
    /// response, or `None` for cross-field rules.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::RequiredField { field }
            | ValidationError::InvalidFormat { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::PatternMismatch { field }
            | ValidationError::ReservedValue { field }
            | ValidationError::DuplicateValue { field }
            | ValidationError::UnknownReference { field } => Some(field),
            ValidationError::InvalidEmail => Some("email"),
            ValidationError::BusinessRuleViolation { .. } => None,
        }
    }
}
