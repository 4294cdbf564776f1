//! Database connection management and repository implementations.

pub mod connection;
pub mod mysql;

pub use connection::create_pool;
pub use mysql::{MySqlCatalogRepository, MySqlReviewRepository, MySqlUserRepository};
