//! MySQL implementation of the ReviewRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use cr_core::domain::entities::comment::Comment;
use cr_core::domain::entities::review::Review;
use cr_core::errors::{DomainError, ValidationError};
use cr_core::repositories::ReviewRepository;

use super::{database_error, violated_key};

const REVIEW_COLUMNS: &str = "id, title_id, author_id, author, text, score, pub_date";
const COMMENT_COLUMNS: &str = "id, review_id, author_id, author, text, pub_date";

/// MySQL implementation of ReviewRepository
pub struct MySqlReviewRepository {
    pool: MySqlPool,
}

impl MySqlReviewRepository {
    /// Create a new MySQL review repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn parse_id(raw: &str) -> Result<Uuid, DomainError> {
        Uuid::parse_str(raw).map_err(|e| DomainError::Database {
            message: format!("Invalid UUID: {e}"),
        })
    }

    fn get<'r, T>(row: &'r sqlx::mysql::MySqlRow, column: &str) -> Result<T, DomainError>
    where
        T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
    {
        row.try_get(column).map_err(|e| DomainError::Database {
            message: format!("Failed to get {column}: {e}"),
        })
    }

    fn row_to_review(row: &sqlx::mysql::MySqlRow) -> Result<Review, DomainError> {
        let id: String = Self::get(row, "id")?;
        let title_id: String = Self::get(row, "title_id")?;
        let author_id: String = Self::get(row, "author_id")?;

        Ok(Review {
            id: Self::parse_id(&id)?,
            title_id: Self::parse_id(&title_id)?,
            author_id: Self::parse_id(&author_id)?,
            author: Self::get(row, "author")?,
            text: Self::get(row, "text")?,
            score: Self::get(row, "score")?,
            pub_date: Self::get::<DateTime<Utc>>(row, "pub_date")?,
        })
    }

    fn row_to_comment(row: &sqlx::mysql::MySqlRow) -> Result<Comment, DomainError> {
        let id: String = Self::get(row, "id")?;
        let review_id: String = Self::get(row, "review_id")?;
        let author_id: String = Self::get(row, "author_id")?;

        Ok(Comment {
            id: Self::parse_id(&id)?,
            review_id: Self::parse_id(&review_id)?,
            author_id: Self::parse_id(&author_id)?,
            author: Self::get(row, "author")?,
            text: Self::get(row, "text")?,
            pub_date: Self::get::<DateTime<Utc>>(row, "pub_date")?,
        })
    }

    fn map_review_write_error(context: &str, err: sqlx::Error) -> DomainError {
        match violated_key(&err).as_deref() {
            Some(key) if key.contains("title_author") => {
                DomainError::ValidationErr(ValidationError::BusinessRuleViolation {
                    rule: "A title can be reviewed only once per user".to_string(),
                })
            }
            _ => database_error(context, err),
        }
    }
}

#[async_trait]
impl ReviewRepository for MySqlReviewRepository {
    async fn list_reviews(&self, title_id: Uuid) -> Result<Vec<Review>, DomainError> {
        let query = format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE title_id = ? ORDER BY pub_date"
        );

        let rows = sqlx::query(&query)
            .bind(title_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| database_error("Failed to list reviews", e))?;

        rows.iter().map(Self::row_to_review).collect()
    }

    async fn find_review(&self, id: Uuid) -> Result<Option<Review>, DomainError> {
        let query = format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ? LIMIT 1");

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("Failed to query review", e))?;

        row.as_ref().map(Self::row_to_review).transpose()
    }

    async fn find_review_by_author(
        &self,
        title_id: Uuid,
        author_id: Uuid,
    ) -> Result<Option<Review>, DomainError> {
        let query = format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE title_id = ? AND author_id = ? LIMIT 1"
        );

        let row = sqlx::query(&query)
            .bind(title_id.to_string())
            .bind(author_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("Failed to query review by author", e))?;

        row.as_ref().map(Self::row_to_review).transpose()
    }

    async fn create_review(&self, review: Review) -> Result<Review, DomainError> {
        let query = r#"
            INSERT INTO reviews (id, title_id, author_id, author, text, score, pub_date)
            VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(review.id.to_string())
            .bind(review.title_id.to_string())
            .bind(review.author_id.to_string())
            .bind(&review.author)
            .bind(&review.text)
            .bind(review.score)
            .bind(review.pub_date)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::map_review_write_error("Failed to create review", e))?;

        Ok(review)
    }

    async fn update_review(&self, review: Review) -> Result<Review, DomainError> {
        let result = sqlx::query("UPDATE reviews SET text = ?, score = ? WHERE id = ?")
            .bind(&review.text)
            .bind(review.score)
            .bind(review.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("Failed to update review", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "review".to_string(),
            });
        }

        Ok(review)
    }

    async fn delete_review(&self, id: Uuid) -> Result<bool, DomainError> {
        // Comments cascade through the foreign key
        let result = sqlx::query("DELETE FROM reviews WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("Failed to delete review", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn average_score(&self, title_id: Uuid) -> Result<Option<f64>, DomainError> {
        let row = sqlx::query("SELECT AVG(score) AS rating FROM reviews WHERE title_id = ?")
            .bind(title_id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| database_error("Failed to aggregate rating", e))?;

        row.try_get::<Option<f64>, _>("rating")
            .map_err(|e| DomainError::Database {
                message: format!("Failed to get rating: {e}"),
            })
    }

    async fn list_comments(&self, review_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        let query = format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE review_id = ? ORDER BY pub_date"
        );

        let rows = sqlx::query(&query)
            .bind(review_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| database_error("Failed to list comments", e))?;

        rows.iter().map(Self::row_to_comment).collect()
    }

    async fn find_comment(&self, id: Uuid) -> Result<Option<Comment>, DomainError> {
        let query = format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE id = ? LIMIT 1");

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("Failed to query comment", e))?;

        row.as_ref().map(Self::row_to_comment).transpose()
    }

    async fn create_comment(&self, comment: Comment) -> Result<Comment, DomainError> {
        let query = r#"
            INSERT INTO comments (id, review_id, author_id, author, text, pub_date)
            VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(comment.id.to_string())
            .bind(comment.review_id.to_string())
            .bind(comment.author_id.to_string())
            .bind(&comment.author)
            .bind(&comment.text)
            .bind(comment.pub_date)
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("Failed to create comment", e))?;

        Ok(comment)
    }

    async fn update_comment(&self, comment: Comment) -> Result<Comment, DomainError> {
        let result = sqlx::query("UPDATE comments SET text = ? WHERE id = ?")
            .bind(&comment.text)
            .bind(comment.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("Failed to update comment", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "comment".to_string(),
            });
        }

        Ok(comment)
    }

    async fn delete_comment(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("Failed to delete comment", e))?;

        Ok(result.rows_affected() > 0)
    }
}
