//! Catalog repository trait covering categories, genres, and titles.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::category::Category;
use crate::domain::entities::genre::Genre;
use crate::domain::entities::title::Title;
use crate::errors::DomainError;

/// Repository contract for catalog entities.
///
/// Slug uniqueness for categories and genres is enforced by the store and
/// surfaced as [`crate::errors::ValidationError::DuplicateValue`] on `slug`.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// List all categories ordered by name
    async fn list_categories(&self) -> Result<Vec<Category>, DomainError>;

    /// Find a category by slug
    async fn find_category(&self, slug: &str) -> Result<Option<Category>, DomainError>;

    /// Persist a new category
    async fn create_category(&self, category: Category) -> Result<Category, DomainError>;

    /// Delete a category by slug, returning whether a row was removed
    async fn delete_category(&self, slug: &str) -> Result<bool, DomainError>;

    /// List all genres ordered by name
    async fn list_genres(&self) -> Result<Vec<Genre>, DomainError>;

    /// Find a genre by slug
    async fn find_genre(&self, slug: &str) -> Result<Option<Genre>, DomainError>;

    /// Persist a new genre
    async fn create_genre(&self, genre: Genre) -> Result<Genre, DomainError>;

    /// Delete a genre by slug, returning whether a row was removed
    async fn delete_genre(&self, slug: &str) -> Result<bool, DomainError>;

    /// List all titles ordered by name
    async fn list_titles(&self) -> Result<Vec<Title>, DomainError>;

    /// Find a title by id
    async fn find_title(&self, id: Uuid) -> Result<Option<Title>, DomainError>;

    /// Persist a new title
    async fn create_title(&self, title: Title) -> Result<Title, DomainError>;

    /// Update an existing title
    async fn update_title(&self, title: Title) -> Result<Title, DomainError>;

    /// Delete a title by id, returning whether a row was removed
    async fn delete_title(&self, id: Uuid) -> Result<bool, DomainError>;
}
