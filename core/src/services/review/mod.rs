//! Review and comment services.

mod service;

pub use service::ReviewService;
