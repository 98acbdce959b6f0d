//! Cart Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::product::Product;

/// Shopping cart with its line items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Cart {
    pub id: String,
    pub created_at: DateTime<Utc>,

    /// Line items (junction table joined to products)
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Total number of units across all lines
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i64::from(i.quantity)).sum()
    }

    pub fn contains(&self, product_slug: &str) -> bool {
        self.items.iter().any(|i| i.product.slug == product_slug)
    }
}

/// One product line in a cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: i32,
}
