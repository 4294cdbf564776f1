//! Genre entity labelling titles (drama, sci-fi, ...).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog genre identified by a unique slug
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// Unique identifier
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Unique URL-safe identifier
    pub slug: String,
}

impl Genre {
    /// Creates a new genre
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            slug: slug.into(),
        }
    }
}
