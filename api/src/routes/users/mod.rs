//! User profile and administration route handlers

pub mod admin;
pub mod me;
