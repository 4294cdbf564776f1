//! # Critica Infrastructure
//!
//! Concrete implementations of the persistence and delivery seams defined in
//! `cr_core`: MySQL-backed repositories and mail transports.

pub mod database;
pub mod mail;

use thiserror::Error;

/// Errors raised by infrastructure components before they are translated
/// into domain errors
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Mail delivery error: {0}")]
    Mail(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}
