//! Account profile and administration services.

mod service;

pub use service::{ProfileUpdate, UserService};
