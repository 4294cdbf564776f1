//! User repository trait defining the interface for user persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository contract for User entities.
///
/// Implementations must enforce the uniqueness of `username` and `email`:
/// `create` and `update` surface a violation as
/// [`crate::errors::ValidationError::DuplicateValue`] naming the offending
/// field, which is how racing registrations are serialized.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by exact username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by exact email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Persist a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError)` - Duplicate username/email or database failure
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Delete a user, returning whether a row was removed
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// List all users ordered by username
    async fn list(&self) -> Result<Vec<User>, DomainError>;
}
