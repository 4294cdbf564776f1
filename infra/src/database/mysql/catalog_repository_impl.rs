//! MySQL implementation of the CatalogRepository trait.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use cr_core::domain::entities::category::Category;
use cr_core::domain::entities::genre::Genre;
use cr_core::domain::entities::title::Title;
use cr_core::errors::{DomainError, ValidationError};
use cr_core::repositories::CatalogRepository;

use super::{database_error, violated_key};

/// MySQL implementation of CatalogRepository
pub struct MySqlCatalogRepository {
    pool: MySqlPool,
}

impl MySqlCatalogRepository {
    /// Create a new MySQL catalog repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn parse_id(raw: &str) -> Result<Uuid, DomainError> {
        Uuid::parse_str(raw).map_err(|e| DomainError::Database {
            message: format!("Invalid UUID: {e}"),
        })
    }

    fn row_to_slugged(row: &sqlx::mysql::MySqlRow) -> Result<(Uuid, String, String), DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Database {
            message: format!("Failed to get id: {e}"),
        })?;
        let name: String = row.try_get("name").map_err(|e| DomainError::Database {
            message: format!("Failed to get name: {e}"),
        })?;
        let slug: String = row.try_get("slug").map_err(|e| DomainError::Database {
            message: format!("Failed to get slug: {e}"),
        })?;
        Ok((Self::parse_id(&id)?, name, slug))
    }

    fn map_slug_error(context: &str, err: sqlx::Error) -> DomainError {
        match violated_key(&err).as_deref() {
            Some(key) if key.contains("slug") => {
                DomainError::ValidationErr(ValidationError::DuplicateValue {
                    field: "slug".to_string(),
                })
            }
            _ => database_error(context, err),
        }
    }

    async fn title_genres(&self, title_id: &str) -> Result<Vec<String>, DomainError> {
        let rows = sqlx::query(
            "SELECT genre_slug FROM title_genres WHERE title_id = ? ORDER BY genre_slug",
        )
        .bind(title_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("Failed to load title genres", e))?;

        rows.iter()
            .map(|row| {
                row.try_get("genre_slug").map_err(|e| DomainError::Database {
                    message: format!("Failed to get genre_slug: {e}"),
                })
            })
            .collect()
    }

    async fn row_to_title(&self, row: &sqlx::mysql::MySqlRow) -> Result<Title, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Database {
            message: format!("Failed to get id: {e}"),
        })?;
        let genres = self.title_genres(&id).await?;

        Ok(Title {
            id: Self::parse_id(&id)?,
            name: row.try_get("name").map_err(|e| DomainError::Database {
                message: format!("Failed to get name: {e}"),
            })?,
            year: row.try_get("year").map_err(|e| DomainError::Database {
                message: format!("Failed to get year: {e}"),
            })?,
            description: row
                .try_get("description")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get description: {e}"),
                })?,
            category: row
                .try_get("category_slug")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get category_slug: {e}"),
                })?,
            genres,
        })
    }

    async fn replace_title_genres(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::MySql>,
        title_id: &str,
        genres: &[String],
    ) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM title_genres WHERE title_id = ?")
            .bind(title_id)
            .execute(&mut **tx)
            .await
            .map_err(|e| database_error("Failed to clear title genres", e))?;

        for slug in genres {
            sqlx::query("INSERT INTO title_genres (title_id, genre_slug) VALUES (?, ?)")
                .bind(title_id)
                .bind(slug)
                .execute(&mut **tx)
                .await
                .map_err(|e| database_error("Failed to attach genre", e))?;
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for MySqlCatalogRepository {
    async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        let rows = sqlx::query("SELECT id, name, slug FROM categories ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| database_error("Failed to list categories", e))?;

        rows.iter()
            .map(|row| {
                let (id, name, slug) = Self::row_to_slugged(row)?;
                Ok(Category { id, name, slug })
            })
            .collect()
    }

    async fn find_category(&self, slug: &str) -> Result<Option<Category>, DomainError> {
        let row = sqlx::query("SELECT id, name, slug FROM categories WHERE slug = ? LIMIT 1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("Failed to query category", e))?;

        row.as_ref()
            .map(|row| {
                let (id, name, slug) = Self::row_to_slugged(row)?;
                Ok(Category { id, name, slug })
            })
            .transpose()
    }

    async fn create_category(&self, category: Category) -> Result<Category, DomainError> {
        sqlx::query("INSERT INTO categories (id, name, slug) VALUES (?, ?, ?)")
            .bind(category.id.to_string())
            .bind(&category.name)
            .bind(&category.slug)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::map_slug_error("Failed to create category", e))?;

        Ok(category)
    }

    async fn delete_category(&self, slug: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM categories WHERE slug = ?")
            .bind(slug)
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("Failed to delete category", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_genres(&self) -> Result<Vec<Genre>, DomainError> {
        let rows = sqlx::query("SELECT id, name, slug FROM genres ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| database_error("Failed to list genres", e))?;

        rows.iter()
            .map(|row| {
                let (id, name, slug) = Self::row_to_slugged(row)?;
                Ok(Genre { id, name, slug })
            })
            .collect()
    }

    async fn find_genre(&self, slug: &str) -> Result<Option<Genre>, DomainError> {
        let row = sqlx::query("SELECT id, name, slug FROM genres WHERE slug = ? LIMIT 1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| database_error("Failed to query genre", e))?;

        row.as_ref()
            .map(|row| {
                let (id, name, slug) = Self::row_to_slugged(row)?;
                Ok(Genre { id, name, slug })
            })
            .transpose()
    }

    async fn create_genre(&self, genre: Genre) -> Result<Genre, DomainError> {
        sqlx::query("INSERT INTO genres (id, name, slug) VALUES (?, ?, ?)")
            .bind(genre.id.to_string())
            .bind(&genre.name)
            .bind(&genre.slug)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::map_slug_error("Failed to create genre", e))?;

        Ok(genre)
    }

    async fn delete_genre(&self, slug: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM genres WHERE slug = ?")
            .bind(slug)
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("Failed to delete genre", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_titles(&self) -> Result<Vec<Title>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, name, year, description, category_slug FROM titles ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("Failed to list titles", e))?;

        let mut titles = Vec::with_capacity(rows.len());
        for row in &rows {
            titles.push(self.row_to_title(row).await?);
        }
        Ok(titles)
    }

    async fn find_title(&self, id: Uuid) -> Result<Option<Title>, DomainError> {
        let row = sqlx::query(
            "SELECT id, name, year, description, category_slug FROM titles WHERE id = ? LIMIT 1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("Failed to query title", e))?;

        match row {
            Some(row) => Ok(Some(self.row_to_title(&row).await?)),
            None => Ok(None),
        }
    }

    async fn create_title(&self, title: Title) -> Result<Title, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("Failed to open transaction", e))?;

        let title_id = title.id.to_string();
        sqlx::query(
            "INSERT INTO titles (id, name, year, description, category_slug) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&title_id)
        .bind(&title.name)
        .bind(title.year)
        .bind(&title.description)
        .bind(&title.category)
        .execute(&mut *tx)
        .await
        .map_err(|e| database_error("Failed to create title", e))?;

        self.replace_title_genres(&mut tx, &title_id, &title.genres)
            .await?;

        tx.commit()
            .await
            .map_err(|e| database_error("Failed to commit title", e))?;

        Ok(title)
    }

    async fn update_title(&self, title: Title) -> Result<Title, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("Failed to open transaction", e))?;

        let title_id = title.id.to_string();
        let result = sqlx::query(
            "UPDATE titles SET name = ?, year = ?, description = ?, category_slug = ? WHERE id = ?",
        )
        .bind(&title.name)
        .bind(title.year)
        .bind(&title.description)
        .bind(&title.category)
        .bind(&title_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| database_error("Failed to update title", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "title".to_string(),
            });
        }

        self.replace_title_genres(&mut tx, &title_id, &title.genres)
            .await?;

        tx.commit()
            .await
            .map_err(|e| database_error("Failed to commit title", e))?;

        Ok(title)
    }

    async fn delete_title(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM titles WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("Failed to delete title", e))?;

        Ok(result.rows_affected() > 0)
    }
}
