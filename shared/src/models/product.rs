//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity (a dish or menu item)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub slug: String,
    pub title: String,
    /// Free text, may contain Markdown
    #[serde(default)]
    pub description: String,
    /// Whole Danish kroner
    pub price_in_dkk: i64,
    pub image_src: Option<String>,
    pub image_alt: Option<String>,
    #[serde(default)]
    pub sort_order: i32,

    // -- Relations (populated by application code, skipped by FromRow) --

    /// Slugs of the categories this product belongs to (junction table)
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Product {
    /// Whether the product is tagged with `category_slug`
    pub fn in_category(&self, category_slug: &str) -> bool {
        self.categories.iter().any(|c| c == category_slug)
    }
}
