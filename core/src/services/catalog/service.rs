//! Catalog service: category/genre/title administration and title reads
//! with aggregated ratings.

use chrono::{Datelike, Utc};
use std::sync::Arc;
use uuid::Uuid;

use cr_shared::utils::validation::{is_valid_slug, MAX_SLUG_LENGTH};

use crate::domain::entities::category::{Category, MAX_NAME_LENGTH};
use crate::domain::entities::genre::Genre;
use crate::domain::entities::title::Title;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::{CatalogRepository, ReviewRepository};
use crate::services::access::{authorize, Action, Actor};

/// Input for creating a title
#[derive(Debug, Clone)]
pub struct TitleDraft {
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    pub category: Option<String>,
    pub genres: Vec<String>,
}

/// Partial update for a title; absent fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct TitlePatch {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub genres: Option<Vec<String>>,
}

/// A title with its references resolved and its rating aggregated
#[derive(Debug, Clone)]
pub struct TitleDetails {
    pub id: Uuid,
    pub name: String,
    pub year: i32,
    pub description: Option<String>,
    /// Integer-rounded mean review score, absent while unreviewed
    pub rating: Option<i32>,
    pub category: Option<Category>,
    pub genres: Vec<Genre>,
}

/// Catalog service over the catalog and review stores
pub struct CatalogService<C, R>
where
    C: CatalogRepository,
    R: ReviewRepository,
{
    catalog: Arc<C>,
    reviews: Arc<R>,
}

impl<C, R> CatalogService<C, R>
where
    C: CatalogRepository,
    R: ReviewRepository,
{
    /// Create a new catalog service
    pub fn new(catalog: Arc<C>, reviews: Arc<R>) -> Self {
        Self { catalog, reviews }
    }

    fn validate_name(name: &str) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "name".to_string(),
            });
        }
        if name.len() > MAX_NAME_LENGTH {
            return Err(ValidationError::TooLong {
                field: "name".to_string(),
                max: MAX_NAME_LENGTH,
                actual: name.len(),
            });
        }
        Ok(())
    }

    fn validate_slug(slug: &str) -> Result<(), ValidationError> {
        if slug.len() > MAX_SLUG_LENGTH {
            return Err(ValidationError::TooLong {
                field: "slug".to_string(),
                max: MAX_SLUG_LENGTH,
                actual: slug.len(),
            });
        }
        if !is_valid_slug(slug) {
            return Err(ValidationError::PatternMismatch {
                field: "slug".to_string(),
            });
        }
        Ok(())
    }

    fn validate_year(year: i32) -> Result<(), ValidationError> {
        if !Title::year_is_valid(year) {
            return Err(ValidationError::OutOfRange {
                field: "year".to_string(),
                min: 0,
                max: i64::from(Utc::now().year()),
            });
        }
        Ok(())
    }

    /// Check that every referenced genre and the category exist
    async fn validate_references(
        &self,
        category: Option<&str>,
        genres: &[String],
    ) -> DomainResult<()> {
        if let Some(slug) = category {
            if self.catalog.find_category(slug).await?.is_none() {
                return Err(DomainError::ValidationErr(ValidationError::UnknownReference {
                    field: "category".to_string(),
                }));
            }
        }
        for slug in genres {
            if self.catalog.find_genre(slug).await?.is_none() {
                return Err(DomainError::ValidationErr(ValidationError::UnknownReference {
                    field: "genre".to_string(),
                }));
            }
        }
        Ok(())
    }

    async fn details(&self, title: Title) -> DomainResult<TitleDetails> {
        let rating = self
            .reviews
            .average_score(title.id)
            .await?
            .map(|avg| avg.round() as i32);

        let category = match &title.category {
            Some(slug) => self.catalog.find_category(slug).await?,
            None => None,
        };

        let mut genres = Vec::with_capacity(title.genres.len());
        for slug in &title.genres {
            if let Some(genre) = self.catalog.find_genre(slug).await? {
                genres.push(genre);
            }
        }

        Ok(TitleDetails {
            id: title.id,
            name: title.name,
            year: title.year,
            description: title.description,
            rating,
            category,
            genres,
        })
    }

    /// List all categories
    pub async fn list_categories(&self) -> DomainResult<Vec<Category>> {
        self.catalog.list_categories().await
    }

    /// Create a category (admin only)
    pub async fn create_category(
        &self,
        actor: Option<&Actor>,
        name: &str,
        slug: &str,
    ) -> DomainResult<Category> {
        authorize(actor, &Action::MutateCatalog)?;
        Self::validate_name(name)?;
        Self::validate_slug(slug)?;
        self.catalog.create_category(Category::new(name, slug)).await
    }

    /// Delete a category by slug (admin only)
    pub async fn delete_category(&self, actor: Option<&Actor>, slug: &str) -> DomainResult<()> {
        authorize(actor, &Action::MutateCatalog)?;
        if !self.catalog.delete_category(slug).await? {
            return Err(DomainError::NotFound {
                resource: "category".to_string(),
            });
        }
        Ok(())
    }

    /// List all genres
    pub async fn list_genres(&self) -> DomainResult<Vec<Genre>> {
        self.catalog.list_genres().await
    }

    /// Create a genre (admin only)
    pub async fn create_genre(
        &self,
        actor: Option<&Actor>,
        name: &str,
        slug: &str,
    ) -> DomainResult<Genre> {
        authorize(actor, &Action::MutateCatalog)?;
        Self::validate_name(name)?;
        Self::validate_slug(slug)?;
        self.catalog.create_genre(Genre::new(name, slug)).await
    }

    /// Delete a genre by slug (admin only)
    pub async fn delete_genre(&self, actor: Option<&Actor>, slug: &str) -> DomainResult<()> {
        authorize(actor, &Action::MutateCatalog)?;
        if !self.catalog.delete_genre(slug).await? {
            return Err(DomainError::NotFound {
                resource: "genre".to_string(),
            });
        }
        Ok(())
    }

    /// List all titles with resolved references and ratings
    pub async fn list_titles(&self) -> DomainResult<Vec<TitleDetails>> {
        let titles = self.catalog.list_titles().await?;
        let mut all = Vec::with_capacity(titles.len());
        for title in titles {
            all.push(self.details(title).await?);
        }
        Ok(all)
    }

    /// Fetch a single title
    pub async fn get_title(&self, id: Uuid) -> DomainResult<TitleDetails> {
        let title = self
            .catalog
            .find_title(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: "title".to_string(),
            })?;
        self.details(title).await
    }

    /// Create a title (admin only)
    pub async fn create_title(
        &self,
        actor: Option<&Actor>,
        draft: TitleDraft,
    ) -> DomainResult<TitleDetails> {
        authorize(actor, &Action::MutateCatalog)?;
        Self::validate_name(&draft.name)?;
        Self::validate_year(draft.year)?;
        self.validate_references(draft.category.as_deref(), &draft.genres)
            .await?;

        let title = Title::new(
            draft.name,
            draft.year,
            draft.description,
            draft.category,
            draft.genres,
        );
        let title = self.catalog.create_title(title).await?;
        self.details(title).await
    }

    /// Partially update a title (admin only)
    pub async fn update_title(
        &self,
        actor: Option<&Actor>,
        id: Uuid,
        patch: TitlePatch,
    ) -> DomainResult<TitleDetails> {
        authorize(actor, &Action::MutateCatalog)?;

        let mut title = self
            .catalog
            .find_title(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: "title".to_string(),
            })?;

        if let Some(name) = patch.name {
            Self::validate_name(&name)?;
            title.name = name;
        }
        if let Some(year) = patch.year {
            Self::validate_year(year)?;
            title.year = year;
        }
        if let Some(description) = patch.description {
            title.description = Some(description);
        }
        if patch.category.is_some() || patch.genres.is_some() {
            self.validate_references(
                patch.category.as_deref(),
                patch.genres.as_deref().unwrap_or(&[]),
            )
            .await?;
        }
        if let Some(category) = patch.category {
            title.category = Some(category);
        }
        if let Some(genres) = patch.genres {
            title.genres = genres;
        }

        let title = self.catalog.update_title(title).await?;
        self.details(title).await
    }

    /// Delete a title (admin only)
    pub async fn delete_title(&self, actor: Option<&Actor>, id: Uuid) -> DomainResult<()> {
        authorize(actor, &Action::MutateCatalog)?;
        if !self.catalog.delete_title(id).await? {
            return Err(DomainError::NotFound {
                resource: "title".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::review::Review;
    use crate::domain::entities::user::Role;
    use crate::errors::AuthError;
    use crate::repositories::{MemoryCatalogRepository, MemoryReviewRepository};
    use chrono::Datelike;

    fn admin() -> Actor {
        Actor::new(Uuid::new_v4(), "admin", Role::Admin)
    }

    fn service() -> (
        CatalogService<MemoryCatalogRepository, MemoryReviewRepository>,
        Arc<MemoryReviewRepository>,
    ) {
        let catalog = Arc::new(MemoryCatalogRepository::new());
        let reviews = Arc::new(MemoryReviewRepository::new());
        (CatalogService::new(catalog, reviews.clone()), reviews)
    }

    #[tokio::test]
    async fn test_category_lifecycle() {
        let (service, _) = service();
        let admin = admin();

        service
            .create_category(Some(&admin), "Films", "films")
            .await
            .unwrap();
        assert_eq!(service.list_categories().await.unwrap().len(), 1);
        service.delete_category(Some(&admin), "films").await.unwrap();
        assert!(service.list_categories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_catalog_mutation_requires_admin() {
        let (service, _) = service();
        let user = Actor::new(Uuid::new_v4(), "user", Role::User);

        let err = service
            .create_category(Some(&user), "Films", "films")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Auth(AuthError::InsufficientPermissions)
        ));

        let err = service.create_category(None, "Films", "films").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized));
    }

    #[tokio::test]
    async fn test_title_requires_known_references() {
        let (service, _) = service();
        let admin = admin();

        let draft = TitleDraft {
            name: "Alien".to_string(),
            year: 1979,
            description: None,
            category: Some("films".to_string()),
            genres: vec![],
        };
        let err = service.create_title(Some(&admin), draft).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::ValidationErr(ValidationError::UnknownReference { .. })
        ));
    }

    #[tokio::test]
    async fn test_future_year_rejected() {
        let (service, _) = service();
        let admin = admin();
        let next_year = chrono::Utc::now().year() + 1;

        let draft = TitleDraft {
            name: "From the future".to_string(),
            year: next_year,
            description: None,
            category: None,
            genres: vec![],
        };
        let err = service.create_title(Some(&admin), draft).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::ValidationErr(ValidationError::OutOfRange { .. })
        ));
    }

    #[tokio::test]
    async fn test_rating_aggregates_reviews() {
        let (service, reviews) = service();
        let admin = admin();

        service
            .create_genre(Some(&admin), "Drama", "drama")
            .await
            .unwrap();
        let title = service
            .create_title(
                Some(&admin),
                TitleDraft {
                    name: "Alien".to_string(),
                    year: 1979,
                    description: Some("In space".to_string()),
                    category: None,
                    genres: vec!["drama".to_string()],
                },
            )
            .await
            .unwrap();
        assert_eq!(title.rating, None);
        assert_eq!(title.genres.len(), 1);

        reviews
            .create_review(Review::new(title.id, Uuid::new_v4(), "a", "ok", 6))
            .await
            .unwrap();
        reviews
            .create_review(Review::new(title.id, Uuid::new_v4(), "b", "good", 9))
            .await
            .unwrap();

        let details = service.get_title(title.id).await.unwrap();
        // (6 + 9) / 2 = 7.5, rounded to 8
        assert_eq!(details.rating, Some(8));
    }

    #[tokio::test]
    async fn test_get_missing_title_is_not_found() {
        let (service, _) = service();
        let err = service.get_title(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
