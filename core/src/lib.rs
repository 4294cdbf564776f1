//! # Critica Core
//!
//! Core business logic and domain layer for the Critica backend.
//! This crate contains domain entities, business services, repository
//! interfaces, and error types that form the foundation of the application
//! architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export the error aliases used by every layer
pub use errors::{DomainError, DomainResult};
