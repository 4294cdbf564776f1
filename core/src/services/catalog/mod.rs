//! Catalog services for categories, genres, and titles.

mod service;

pub use service::{CatalogService, TitleDetails, TitleDraft, TitlePatch};
