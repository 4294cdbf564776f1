//! Title entity: a reviewable work in the catalog.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a title name
pub const MAX_NAME_LENGTH: usize = 256;

/// A work that users can review, tagged with genres and optionally
/// attached to a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    /// Unique identifier
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Release year; must not lie in the future
    pub year: i32,

    /// Optional description
    pub description: Option<String>,

    /// Slug of the category this title belongs to
    pub category: Option<String>,

    /// Slugs of the genres attached to this title
    pub genres: Vec<String>,
}

impl Title {
    /// Creates a new title
    pub fn new(
        name: impl Into<String>,
        year: i32,
        description: Option<String>,
        category: Option<String>,
        genres: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            year,
            description,
            category,
            genres,
        }
    }

    /// Whether the release year is plausible (not in the future)
    pub fn year_is_valid(year: i32) -> bool {
        year <= Utc::now().year()
    }
}
