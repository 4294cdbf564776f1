use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use cr_core::domain::entities::category::Category;
use cr_core::domain::entities::genre::Genre;
use cr_core::services::catalog::{TitleDetails, TitleDraft, TitlePatch};

/// Payload for creating a category or genre
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SlugItemRequest {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    #[validate(length(min = 1, max = 50))]
    pub slug: String,
}

/// Category or genre representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlugItemResponse {
    pub name: String,
    pub slug: String,
}

impl From<&Category> for SlugItemResponse {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            slug: category.slug.clone(),
        }
    }
}

impl From<&Genre> for SlugItemResponse {
    fn from(genre: &Genre) -> Self {
        Self {
            name: genre.name.clone(),
            slug: genre.slug.clone(),
        }
    }
}

/// Payload for creating a title
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TitleCreateRequest {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    pub year: i32,

    pub description: Option<String>,

    /// Genre slugs; all must exist
    #[serde(default)]
    pub genre: Vec<String>,

    /// Category slug; must exist when given
    pub category: Option<String>,
}

impl TitleCreateRequest {
    pub fn into_draft(self) -> TitleDraft {
        TitleDraft {
            name: self.name,
            year: self.year,
            description: self.description,
            category: self.category,
            genres: self.genre,
        }
    }
}

/// Partial title update
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TitleUpdateRequest {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,

    pub year: Option<i32>,

    pub description: Option<String>,

    pub genre: Option<Vec<String>>,

    pub category: Option<String>,
}

impl TitleUpdateRequest {
    pub fn into_patch(self) -> TitlePatch {
        TitlePatch {
            name: self.name,
            year: self.year,
            description: self.description,
            category: self.category,
            genres: self.genre,
        }
    }
}

/// Title representation with resolved references and aggregated rating
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleResponse {
    pub id: Uuid,
    pub name: String,
    pub year: i32,
    pub rating: Option<i32>,
    pub description: Option<String>,
    pub genre: Vec<SlugItemResponse>,
    pub category: Option<SlugItemResponse>,
}

impl From<&TitleDetails> for TitleResponse {
    fn from(details: &TitleDetails) -> Self {
        Self {
            id: details.id,
            name: details.name.clone(),
            year: details.year,
            rating: details.rating,
            description: details.description.clone(),
            genre: details.genres.iter().map(SlugItemResponse::from).collect(),
            category: details.category.as_ref().map(SlugItemResponse::from),
        }
    }
}
