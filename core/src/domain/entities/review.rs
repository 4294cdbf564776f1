//! Review entity: a scored, authored text about a title.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lowest accepted score
pub const MIN_SCORE: i32 = 1;

/// Highest accepted score
pub const MAX_SCORE: i32 = 10;

/// A user's review of a title. Each user may review a title once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Unique identifier
    pub id: Uuid,

    /// Title this review belongs to
    pub title_id: Uuid,

    /// Identifier of the authoring user
    pub author_id: Uuid,

    /// Username of the authoring user, denormalized for serialization
    pub author: String,

    /// Review text
    pub text: String,

    /// Score between [`MIN_SCORE`] and [`MAX_SCORE`] inclusive
    pub score: i32,

    /// Timestamp when the review was published
    pub pub_date: DateTime<Utc>,
}

impl Review {
    /// Creates a new review
    pub fn new(
        title_id: Uuid,
        author_id: Uuid,
        author: impl Into<String>,
        text: impl Into<String>,
        score: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title_id,
            author_id,
            author: author.into(),
            text: text.into(),
            score,
            pub_date: Utc::now(),
        }
    }

    /// Whether a score lies within the accepted range
    pub fn score_is_valid(score: i32) -> bool {
        (MIN_SCORE..=MAX_SCORE).contains(&score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bounds() {
        assert!(Review::score_is_valid(MIN_SCORE));
        assert!(Review::score_is_valid(MAX_SCORE));
        assert!(Review::score_is_valid(5));
        assert!(!Review::score_is_valid(0));
        assert!(!Review::score_is_valid(11));
        assert!(!Review::score_is_valid(-3));
    }
}
