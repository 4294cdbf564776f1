//! Comment entity: an authored remark attached to a review.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A comment on a review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique identifier
    pub id: Uuid,

    /// Review this comment belongs to
    pub review_id: Uuid,

    /// Identifier of the authoring user
    pub author_id: Uuid,

    /// Username of the authoring user, denormalized for serialization
    pub author: String,

    /// Comment text
    pub text: String,

    /// Timestamp when the comment was published
    pub pub_date: DateTime<Utc>,
}

impl Comment {
    /// Creates a new comment
    pub fn new(
        review_id: Uuid,
        author_id: Uuid,
        author: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            review_id,
            author_id,
            author: author.into(),
            text: text.into(),
            pub_date: Utc::now(),
        }
    }
}
