//! Category entity grouping titles by kind (films, books, music, ...).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a category name
pub const MAX_NAME_LENGTH: usize = 256;

/// A catalog category identified by a unique slug
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Unique URL-safe identifier
    pub slug: String,
}

impl Category {
    /// Creates a new category
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            slug: slug.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::new("Films", "films");
        assert_eq!(category.name, "Films");
        assert_eq!(category.slug, "films");
    }
}
