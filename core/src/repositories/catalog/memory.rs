//! In-memory implementation of CatalogRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::category::Category;
use crate::domain::entities::genre::Genre;
use crate::domain::entities::title::Title;
use crate::errors::{DomainError, ValidationError};

use super::repository::CatalogRepository;

/// In-memory catalog repository backed by slug- and id-keyed maps
#[derive(Clone, Default)]
pub struct MemoryCatalogRepository {
    categories: Arc<RwLock<HashMap<String, Category>>>,
    genres: Arc<RwLock<HashMap<String, Genre>>>,
    titles: Arc<RwLock<HashMap<Uuid, Title>>>,
}

impl MemoryCatalogRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate_slug() -> DomainError {
    DomainError::ValidationErr(ValidationError::DuplicateValue {
        field: "slug".to_string(),
    })
}

#[async_trait]
impl CatalogRepository for MemoryCatalogRepository {
    async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        let categories = self.categories.read().await;
        let mut all: Vec<Category> = categories.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn find_category(&self, slug: &str) -> Result<Option<Category>, DomainError> {
        let categories = self.categories.read().await;
        Ok(categories.get(slug).cloned())
    }

    async fn create_category(&self, category: Category) -> Result<Category, DomainError> {
        let mut categories = self.categories.write().await;
        if categories.contains_key(&category.slug) {
            return Err(duplicate_slug());
        }
        categories.insert(category.slug.clone(), category.clone());
        Ok(category)
    }

    async fn delete_category(&self, slug: &str) -> Result<bool, DomainError> {
        let mut categories = self.categories.write().await;
        Ok(categories.remove(slug).is_some())
    }

    async fn list_genres(&self) -> Result<Vec<Genre>, DomainError> {
        let genres = self.genres.read().await;
        let mut all: Vec<Genre> = genres.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn find_genre(&self, slug: &str) -> Result<Option<Genre>, DomainError> {
        let genres = self.genres.read().await;
        Ok(genres.get(slug).cloned())
    }

    async fn create_genre(&self, genre: Genre) -> Result<Genre, DomainError> {
        let mut genres = self.genres.write().await;
        if genres.contains_key(&genre.slug) {
            return Err(duplicate_slug());
        }
        genres.insert(genre.slug.clone(), genre.clone());
        Ok(genre)
    }

    async fn delete_genre(&self, slug: &str) -> Result<bool, DomainError> {
        let mut genres = self.genres.write().await;
        Ok(genres.remove(slug).is_some())
    }

    async fn list_titles(&self) -> Result<Vec<Title>, DomainError> {
        let titles = self.titles.read().await;
        let mut all: Vec<Title> = titles.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn find_title(&self, id: Uuid) -> Result<Option<Title>, DomainError> {
        let titles = self.titles.read().await;
        Ok(titles.get(&id).cloned())
    }

    async fn create_title(&self, title: Title) -> Result<Title, DomainError> {
        let mut titles = self.titles.write().await;
        titles.insert(title.id, title.clone());
        Ok(title)
    }

    async fn update_title(&self, title: Title) -> Result<Title, DomainError> {
        let mut titles = self.titles.write().await;
        if !titles.contains_key(&title.id) {
            return Err(DomainError::NotFound {
                resource: "title".to_string(),
            });
        }
        titles.insert(title.id, title.clone());
        Ok(title)
    }

    async fn delete_title(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut titles = self.titles.write().await;
        Ok(titles.remove(&id).is_some())
    }
}
