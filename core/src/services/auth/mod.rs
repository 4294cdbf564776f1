//! Registration and token exchange services.

pub mod identity;
mod service;

pub use identity::{validate_email, validate_username};
pub use service::{AuthService, SignupOutcome};
