//! In-memory implementation of ReviewRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::comment::Comment;
use crate::domain::entities::review::Review;
use crate::errors::{DomainError, ValidationError};

use super::repository::ReviewRepository;

/// In-memory review and comment repository
#[derive(Clone, Default)]
pub struct MemoryReviewRepository {
    reviews: Arc<RwLock<HashMap<Uuid, Review>>>,
    comments: Arc<RwLock<HashMap<Uuid, Comment>>>,
}

impl MemoryReviewRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReviewRepository for MemoryReviewRepository {
    async fn list_reviews(&self, title_id: Uuid) -> Result<Vec<Review>, DomainError> {
        let reviews = self.reviews.read().await;
        let mut all: Vec<Review> = reviews
            .values()
            .filter(|r| r.title_id == title_id)
            .cloned()
            .collect();
        all.sort_by_key(|r| r.pub_date);
        Ok(all)
    }

    async fn find_review(&self, id: Uuid) -> Result<Option<Review>, DomainError> {
        let reviews = self.reviews.read().await;
        Ok(reviews.get(&id).cloned())
    }

    async fn find_review_by_author(
        &self,
        title_id: Uuid,
        author_id: Uuid,
    ) -> Result<Option<Review>, DomainError> {
        let reviews = self.reviews.read().await;
        Ok(reviews
            .values()
            .find(|r| r.title_id == title_id && r.author_id == author_id)
            .cloned())
    }

    async fn create_review(&self, review: Review) -> Result<Review, DomainError> {
        let mut reviews = self.reviews.write().await;

        let already_reviewed = reviews
            .values()
            .any(|r| r.title_id == review.title_id && r.author_id == review.author_id);
        if already_reviewed {
            return Err(DomainError::ValidationErr(
                ValidationError::BusinessRuleViolation {
                    rule: "A title can be reviewed only once per user".to_string(),
                },
            ));
        }

        reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn update_review(&self, review: Review) -> Result<Review, DomainError> {
        let mut reviews = self.reviews.write().await;
        if !reviews.contains_key(&review.id) {
            return Err(DomainError::NotFound {
                resource: "review".to_string(),
            });
        }
        reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn delete_review(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut reviews = self.reviews.write().await;
        let removed = reviews.remove(&id).is_some();
        if removed {
            let mut comments = self.comments.write().await;
            comments.retain(|_, c| c.review_id != id);
        }
        Ok(removed)
    }

    async fn average_score(&self, title_id: Uuid) -> Result<Option<f64>, DomainError> {
        let reviews = self.reviews.read().await;
        let scores: Vec<i32> = reviews
            .values()
            .filter(|r| r.title_id == title_id)
            .map(|r| r.score)
            .collect();
        if scores.is_empty() {
            return Ok(None);
        }
        let sum: i32 = scores.iter().sum();
        Ok(Some(f64::from(sum) / scores.len() as f64))
    }

    async fn list_comments(&self, review_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        let comments = self.comments.read().await;
        let mut all: Vec<Comment> = comments
            .values()
            .filter(|c| c.review_id == review_id)
            .cloned()
            .collect();
        all.sort_by_key(|c| c.pub_date);
        Ok(all)
    }

    async fn find_comment(&self, id: Uuid) -> Result<Option<Comment>, DomainError> {
        let comments = self.comments.read().await;
        Ok(comments.get(&id).cloned())
    }

    async fn create_comment(&self, comment: Comment) -> Result<Comment, DomainError> {
        let mut comments = self.comments.write().await;
        comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn update_comment(&self, comment: Comment) -> Result<Comment, DomainError> {
        let mut comments = self.comments.write().await;
        if !comments.contains_key(&comment.id) {
            return Err(DomainError::NotFound {
                resource: "comment".to_string(),
            });
        }
        comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn delete_comment(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut comments = self.comments.write().await;
        Ok(comments.remove(&id).is_some())
    }
}
