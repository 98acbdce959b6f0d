//! Catalog storage
//!
//! [`CatalogRepository`] is the only way handlers reach stored data. Two
//! backends implement it: PostgreSQL via sqlx and an immutable in-memory
//! catalog used for `CATALOG_BACKEND=memory` and tests.

pub mod memory;
pub mod postgres;
pub mod seed;

pub use memory::MemoryCatalogRepository;
pub use postgres::PgCatalogRepository;

use async_trait::async_trait;
use shared::models::{Cart, Category, Product, Post};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Migration error: {0}")]
    Migration(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for RepoError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        RepoError::Migration(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Product listing predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFilter {
    /// Category slugs; empty means unrestricted. A product matches when it
    /// belongs to at least one of them.
    pub categories: Vec<String>,
    /// Maximum number of rows returned
    pub limit: usize,
}

impl ProductFilter {
    pub fn in_categories(categories: Vec<String>, limit: usize) -> Self {
        Self { categories, limit }
    }

    /// Whether `product` passes the category predicate
    pub fn matches(&self, product: &Product) -> bool {
        self.categories.is_empty() || self.categories.iter().any(|c| product.in_category(c))
    }
}

/// A category together with its first few products
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryWithProducts {
    pub category: Category,
    pub products: Vec<Product>,
}

/// Read-only access to the catalog, posts and carts.
///
/// Categories and products are always returned ordered by
/// `(sort_order, slug)`.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_categories(&self) -> RepoResult<Vec<Category>>;

    async fn list_products(&self, filter: &ProductFilter) -> RepoResult<Vec<Product>>;

    async fn find_product(&self, slug: &str) -> RepoResult<Option<Product>>;

    /// Every category with at most `per_category` of its products
    async fn featured_by_category(
        &self,
        per_category: usize,
    ) -> RepoResult<Vec<CategoryWithProducts>>;

    /// Posts, newest first
    async fn list_posts(&self) -> RepoResult<Vec<Post>>;

    async fn find_cart(&self, id: &str) -> RepoResult<Option<Cart>>;

    async fn product_in_cart(&self, cart_id: &str, product_slug: &str) -> RepoResult<bool>;
}
