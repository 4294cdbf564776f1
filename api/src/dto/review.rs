use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use cr_core::domain::entities::comment::Comment;
use cr_core::domain::entities::review::Review;

/// Payload for posting a review
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReviewCreateRequest {
    #[validate(length(min = 1))]
    pub text: String,

    /// Score from 1 to 10
    pub score: i32,
}

/// Partial review update
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ReviewUpdateRequest {
    #[validate(length(min = 1))]
    pub text: Option<String>,

    pub score: Option<i32>,
}

/// Review representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub author: String,
    pub text: String,
    pub score: i32,
    pub pub_date: DateTime<Utc>,
}

impl From<&Review> for ReviewResponse {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id,
            author: review.author.clone(),
            text: review.text.clone(),
            score: review.score,
            pub_date: review.pub_date,
        }
    }
}

/// Payload for posting or editing a comment
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(length(min = 1))]
    pub text: String,
}

/// Comment representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub author: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            author: comment.author.clone(),
            text: comment.text.clone(),
            pub_date: comment.pub_date,
        }
    }
}
