//! MySQL repository implementations.
//!
//! Identifiers are stored as CHAR(36) UUID strings. Unique indexes carry the
//! names the error mapping relies on: `uq_users_username`, `uq_users_email`,
//! `uq_categories_slug`, `uq_genres_slug`, and `uq_reviews_title_author`.
//! The schema lives in `infra/migrations`.

mod catalog_repository_impl;
mod review_repository_impl;
mod user_repository_impl;

pub use catalog_repository_impl::MySqlCatalogRepository;
pub use review_repository_impl::MySqlReviewRepository;
pub use user_repository_impl::MySqlUserRepository;

use cr_core::errors::DomainError;

/// Name of the unique key violated by a duplicate-entry error, if any.
///
/// MySQL reports constraint races as error 1062 with the violated key named
/// in the message; this is how concurrent writers of the same unique value
/// are serialized and surfaced as field conflicts instead of 500s.
pub(crate) fn violated_key(err: &sqlx::Error) -> Option<String> {
    let db_err = match err {
        sqlx::Error::Database(db_err) => db_err,
        _ => return None,
    };
    let message = db_err.message();
    if !message.contains("Duplicate entry") {
        return None;
    }
    message
        .rsplit("for key ")
        .next()
        .map(|key| key.trim_matches(|c| c == '\'' || c == '.').to_string())
}

/// Fallback translation for sqlx errors that carry no domain meaning
pub(crate) fn database_error(context: &str, err: sqlx::Error) -> DomainError {
    DomainError::Database {
        message: format!("{context}: {err}"),
    }
}
