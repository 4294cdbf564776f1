//! Confirmation code derivation and verification.

mod service;

pub use service::{CodeIssuer, CODE_LENGTH};
