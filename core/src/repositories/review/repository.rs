//! Review and comment repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::comment::Comment;
use crate::domain::entities::review::Review;
use crate::errors::DomainError;

/// Repository contract for reviews and their comments.
///
/// The store enforces one review per `(title, author)` pair; a violation is
/// surfaced as [`crate::errors::ValidationError::BusinessRuleViolation`].
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// List the reviews of a title ordered by publication date
    async fn list_reviews(&self, title_id: Uuid) -> Result<Vec<Review>, DomainError>;

    /// Find a review by id
    async fn find_review(&self, id: Uuid) -> Result<Option<Review>, DomainError>;

    /// Find the review a given author wrote for a given title
    async fn find_review_by_author(
        &self,
        title_id: Uuid,
        author_id: Uuid,
    ) -> Result<Option<Review>, DomainError>;

    /// Persist a new review
    async fn create_review(&self, review: Review) -> Result<Review, DomainError>;

    /// Update an existing review
    async fn update_review(&self, review: Review) -> Result<Review, DomainError>;

    /// Delete a review and its comments, returning whether a row was removed
    async fn delete_review(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Mean review score of a title, `None` when it has no reviews
    async fn average_score(&self, title_id: Uuid) -> Result<Option<f64>, DomainError>;

    /// List the comments of a review ordered by publication date
    async fn list_comments(&self, review_id: Uuid) -> Result<Vec<Comment>, DomainError>;

    /// Find a comment by id
    async fn find_comment(&self, id: Uuid) -> Result<Option<Comment>, DomainError>;

    /// Persist a new comment
    async fn create_comment(&self, comment: Comment) -> Result<Comment, DomainError>;

    /// Update an existing comment
    async fn update_comment(&self, comment: Comment) -> Result<Comment, DomainError>;

    /// Delete a comment, returning whether a row was removed
    async fn delete_comment(&self, id: Uuid) -> Result<bool, DomainError>;
}
