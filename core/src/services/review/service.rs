//! Review and comment service.
//!
//! Operations are addressed through the nesting
//! `titles/{title}/reviews/{review}/comments/{comment}`; every lookup
//! re-checks the parent chain so an id reached through the wrong parent is
//! treated as missing.

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::comment::Comment;
use crate::domain::entities::review::{Review, MAX_SCORE, MIN_SCORE};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::{CatalogRepository, ReviewRepository};
use crate::services::access::{authorize, Action, Actor};

/// Review and comment operations over the review and catalog stores
pub struct ReviewService<R, C>
where
    R: ReviewRepository,
    C: CatalogRepository,
{
    reviews: Arc<R>,
    catalog: Arc<C>,
}

impl<R, C> ReviewService<R, C>
where
    R: ReviewRepository,
    C: CatalogRepository,
{
    /// Create a new review service
    pub fn new(reviews: Arc<R>, catalog: Arc<C>) -> Self {
        Self { reviews, catalog }
    }

    fn not_found(resource: &str) -> DomainError {
        DomainError::NotFound {
            resource: resource.to_string(),
        }
    }

    fn validate_text(text: &str) -> Result<(), ValidationError> {
        if text.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "text".to_string(),
            });
        }
        Ok(())
    }

    fn validate_score(score: i32) -> Result<(), ValidationError> {
        if !Review::score_is_valid(score) {
            return Err(ValidationError::OutOfRange {
                field: "score".to_string(),
                min: i64::from(MIN_SCORE),
                max: i64::from(MAX_SCORE),
            });
        }
        Ok(())
    }

    async fn require_title(&self, title_id: Uuid) -> DomainResult<()> {
        if self.catalog.find_title(title_id).await?.is_none() {
            return Err(Self::not_found("title"));
        }
        Ok(())
    }

    /// Fetch a review, checking it belongs to the given title
    async fn require_review(&self, title_id: Uuid, review_id: Uuid) -> DomainResult<Review> {
        self.require_title(title_id).await?;
        match self.reviews.find_review(review_id).await? {
            Some(review) if review.title_id == title_id => Ok(review),
            _ => Err(Self::not_found("review")),
        }
    }

    /// Fetch a comment, checking the full parent chain
    async fn require_comment(
        &self,
        title_id: Uuid,
        review_id: Uuid,
        comment_id: Uuid,
    ) -> DomainResult<Comment> {
        self.require_review(title_id, review_id).await?;
        match self.reviews.find_comment(comment_id).await? {
            Some(comment) if comment.review_id == review_id => Ok(comment),
            _ => Err(Self::not_found("comment")),
        }
    }

    /// List the reviews of a title
    pub async fn list_reviews(&self, title_id: Uuid) -> DomainResult<Vec<Review>> {
        self.require_title(title_id).await?;
        self.reviews.list_reviews(title_id).await
    }

    /// Fetch a single review
    pub async fn get_review(&self, title_id: Uuid, review_id: Uuid) -> DomainResult<Review> {
        self.require_review(title_id, review_id).await
    }

    /// Post a review (one per author per title)
    pub async fn create_review(
        &self,
        actor: Option<&Actor>,
        title_id: Uuid,
        text: &str,
        score: i32,
    ) -> DomainResult<Review> {
        authorize(actor, &Action::CreateReview)?;
        let actor = actor.ok_or(DomainError::Unauthorized)?;

        self.require_title(title_id).await?;
        Self::validate_text(text)?;
        Self::validate_score(score)?;

        if self
            .reviews
            .find_review_by_author(title_id, actor.id)
            .await?
            .is_some()
        {
            return Err(DomainError::ValidationErr(
                ValidationError::BusinessRuleViolation {
                    rule: "A title can be reviewed only once per user".to_string(),
                },
            ));
        }

        let review = Review::new(title_id, actor.id, actor.username.clone(), text, score);
        self.reviews.create_review(review).await
    }

    /// Update a review (owner, moderator, or admin)
    pub async fn update_review(
        &self,
        actor: Option<&Actor>,
        title_id: Uuid,
        review_id: Uuid,
        text: Option<String>,
        score: Option<i32>,
    ) -> DomainResult<Review> {
        let mut review = self.require_review(title_id, review_id).await?;
        authorize(
            actor,
            &Action::MutateReview {
                owner: review.author_id,
            },
        )?;

        if let Some(text) = text {
            Self::validate_text(&text)?;
            review.text = text;
        }
        if let Some(score) = score {
            Self::validate_score(score)?;
            review.score = score;
        }

        self.reviews.update_review(review).await
    }

    /// Delete a review (owner, moderator, or admin)
    pub async fn delete_review(
        &self,
        actor: Option<&Actor>,
        title_id: Uuid,
        review_id: Uuid,
    ) -> DomainResult<()> {
        let review = self.require_review(title_id, review_id).await?;
        authorize(
            actor,
            &Action::MutateReview {
                owner: review.author_id,
            },
        )?;

        self.reviews.delete_review(review.id).await?;
        Ok(())
    }

    /// List the comments of a review
    pub async fn list_comments(
        &self,
        title_id: Uuid,
        review_id: Uuid,
    ) -> DomainResult<Vec<Comment>> {
        self.require_review(title_id, review_id).await?;
        self.reviews.list_comments(review_id).await
    }

    /// Fetch a single comment
    pub async fn get_comment(
        &self,
        title_id: Uuid,
        review_id: Uuid,
        comment_id: Uuid,
    ) -> DomainResult<Comment> {
        self.require_comment(title_id, review_id, comment_id).await
    }

    /// Post a comment on a review
    pub async fn create_comment(
        &self,
        actor: Option<&Actor>,
        title_id: Uuid,
        review_id: Uuid,
        text: &str,
    ) -> DomainResult<Comment> {
        authorize(actor, &Action::CreateComment)?;
        let actor = actor.ok_or(DomainError::Unauthorized)?;

        self.require_review(title_id, review_id).await?;
        Self::validate_text(text)?;

        let comment = Comment::new(review_id, actor.id, actor.username.clone(), text);
        self.reviews.create_comment(comment).await
    }

    /// Update a comment (owner, moderator, or admin)
    pub async fn update_comment(
        &self,
        actor: Option<&Actor>,
        title_id: Uuid,
        review_id: Uuid,
        comment_id: Uuid,
        text: &str,
    ) -> DomainResult<Comment> {
        let mut comment = self.require_comment(title_id, review_id, comment_id).await?;
        authorize(
            actor,
            &Action::MutateComment {
                owner: comment.author_id,
            },
        )?;

        Self::validate_text(text)?;
        comment.text = text.to_string();
        self.reviews.update_comment(comment).await
    }

    /// Delete a comment (owner, moderator, or admin)
    pub async fn delete_comment(
        &self,
        actor: Option<&Actor>,
        title_id: Uuid,
        review_id: Uuid,
        comment_id: Uuid,
    ) -> DomainResult<()> {
        let comment = self.require_comment(title_id, review_id, comment_id).await?;
        authorize(
            actor,
            &Action::MutateComment {
                owner: comment.author_id,
            },
        )?;

        self.reviews.delete_comment(comment.id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::title::Title;
    use crate::domain::entities::user::Role;
    use crate::errors::AuthError;
    use crate::repositories::{MemoryCatalogRepository, MemoryReviewRepository};

    struct Fixture {
        service: ReviewService<MemoryReviewRepository, MemoryCatalogRepository>,
        title_id: Uuid,
    }

    async fn fixture() -> Fixture {
        let reviews = Arc::new(MemoryReviewRepository::new());
        let catalog = Arc::new(MemoryCatalogRepository::new());
        let title = catalog
            .create_title(Title::new("Alien", 1979, None, None, vec![]))
            .await
            .unwrap();
        Fixture {
            service: ReviewService::new(reviews, catalog),
            title_id: title.id,
        }
    }

    fn actor(role: Role) -> Actor {
        Actor::new(Uuid::new_v4(), format!("{role:?}").to_lowercase(), role)
    }

    #[tokio::test]
    async fn test_review_lifecycle() {
        let f = fixture().await;
        let alice = actor(Role::User);

        let review = f
            .service
            .create_review(Some(&alice), f.title_id, "great", 9)
            .await
            .unwrap();
        assert_eq!(review.author, alice.username);

        let listed = f.service.list_reviews(f.title_id).await.unwrap();
        assert_eq!(listed.len(), 1);

        let updated = f
            .service
            .update_review(Some(&alice), f.title_id, review.id, None, Some(7))
            .await
            .unwrap();
        assert_eq!(updated.score, 7);
        assert_eq!(updated.text, "great");

        f.service
            .delete_review(Some(&alice), f.title_id, review.id)
            .await
            .unwrap();
        assert!(f.service.list_reviews(f.title_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_second_review_by_same_author_rejected() {
        let f = fixture().await;
        let alice = actor(Role::User);

        f.service
            .create_review(Some(&alice), f.title_id, "great", 9)
            .await
            .unwrap();
        let err = f
            .service
            .create_review(Some(&alice), f.title_id, "changed my mind", 2)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::ValidationErr(ValidationError::BusinessRuleViolation { .. })
        ));
    }

    #[tokio::test]
    async fn test_score_out_of_range_rejected() {
        let f = fixture().await;
        let alice = actor(Role::User);

        for score in [0, 11, -1] {
            let err = f
                .service
                .create_review(Some(&alice), f.title_id, "text", score)
                .await
                .unwrap_err();
            assert!(
                matches!(
                    err,
                    DomainError::ValidationErr(ValidationError::OutOfRange { .. })
                ),
                "score {score} must be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_foreign_review_is_protected_from_users() {
        let f = fixture().await;
        let alice = actor(Role::User);
        let bob = actor(Role::User);

        let review = f
            .service
            .create_review(Some(&alice), f.title_id, "great", 9)
            .await
            .unwrap();

        let err = f
            .service
            .delete_review(Some(&bob), f.title_id, review.id)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Auth(AuthError::InsufficientPermissions)
        ));
    }

    #[tokio::test]
    async fn test_moderator_can_delete_any_review() {
        let f = fixture().await;
        let alice = actor(Role::User);
        let moderator = actor(Role::Moderator);

        let review = f
            .service
            .create_review(Some(&alice), f.title_id, "great", 9)
            .await
            .unwrap();
        f.service
            .delete_review(Some(&moderator), f.title_id, review.id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_wrong_parent_chain_is_not_found() {
        let f = fixture().await;
        let alice = actor(Role::User);
        let review = f
            .service
            .create_review(Some(&alice), f.title_id, "great", 9)
            .await
            .unwrap();

        // Right review id, wrong title id
        let err = f
            .service
            .get_review(Uuid::new_v4(), review.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_comment_lifecycle() {
        let f = fixture().await;
        let alice = actor(Role::User);
        let bob = actor(Role::User);

        let review = f
            .service
            .create_review(Some(&alice), f.title_id, "great", 9)
            .await
            .unwrap();
        let comment = f
            .service
            .create_comment(Some(&bob), f.title_id, review.id, "agreed")
            .await
            .unwrap();

        // Bob edits his comment; Alice may not
        f.service
            .update_comment(Some(&bob), f.title_id, review.id, comment.id, "strongly agreed")
            .await
            .unwrap();
        let err = f
            .service
            .delete_comment(Some(&alice), f.title_id, review.id, comment.id)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Auth(AuthError::InsufficientPermissions)
        ));

        f.service
            .delete_comment(Some(&bob), f.title_id, review.id, comment.id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_anonymous_cannot_post() {
        let f = fixture().await;
        let err = f
            .service
            .create_review(None, f.title_id, "text", 5)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized));
    }
}
