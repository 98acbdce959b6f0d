//! Category Model

use serde::{Deserialize, Serialize};

/// Category entity
///
/// `slug` is the identity and the value carried in `category[]` filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Category {
    pub slug: String,
    pub title: String,
    /// Explicit display order; ties are broken by slug
    #[serde(default)]
    pub sort_order: i32,
}

impl Category {
    pub fn new(slug: impl Into<String>, title: impl Into<String>, sort_order: i32) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            sort_order,
        }
    }
}
