//! In-process catalog backend
//!
//! Immutable after construction, so it is shared across requests without
//! locking.

use async_trait::async_trait;
use shared::models::{Cart, Category, Post, Product};

use super::seed::Fixtures;
use super::{CatalogRepository, CategoryWithProducts, ProductFilter, RepoResult};

#[derive(Debug, Clone, Default)]
pub struct MemoryCatalogRepository {
    categories: Vec<Category>,
    products: Vec<Product>,
    posts: Vec<Post>,
    carts: Vec<Cart>,
}

impl MemoryCatalogRepository {
    pub fn new(
        mut categories: Vec<Category>,
        mut products: Vec<Product>,
        mut posts: Vec<Post>,
        carts: Vec<Cart>,
    ) -> Self {
        categories.sort_by(|a, b| (a.sort_order, &a.slug).cmp(&(b.sort_order, &b.slug)));
        products.sort_by(|a, b| (a.sort_order, &a.slug).cmp(&(b.sort_order, &b.slug)));
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Self {
            categories,
            products,
            posts,
            carts,
        }
    }

    pub fn from_fixtures(fixtures: Fixtures) -> Self {
        Self::new(
            fixtures.categories,
            fixtures.products,
            fixtures.posts,
            fixtures.carts,
        )
    }
}

#[async_trait]
impl CatalogRepository for MemoryCatalogRepository {
    async fn list_categories(&self) -> RepoResult<Vec<Category>> {
        Ok(self.categories.clone())
    }

    async fn list_products(&self, filter: &ProductFilter) -> RepoResult<Vec<Product>> {
        Ok(self
            .products
            .iter()
            .filter(|p| filter.matches(p))
            .take(filter.limit)
            .cloned()
            .collect())
    }

    async fn find_product(&self, slug: &str) -> RepoResult<Option<Product>> {
        Ok(self.products.iter().find(|p| p.slug == slug).cloned())
    }

    async fn featured_by_category(
        &self,
        per_category: usize,
    ) -> RepoResult<Vec<CategoryWithProducts>> {
        Ok(self
            .categories
            .iter()
            .map(|category| CategoryWithProducts {
                category: category.clone(),
                products: self
                    .products
                    .iter()
                    .filter(|p| p.in_category(&category.slug))
                    .take(per_category)
                    .cloned()
                    .collect(),
            })
            .collect())
    }

    async fn list_posts(&self) -> RepoResult<Vec<Post>> {
        Ok(self.posts.clone())
    }

    async fn find_cart(&self, id: &str) -> RepoResult<Option<Cart>> {
        Ok(self.carts.iter().find(|c| c.id == id).cloned())
    }

    async fn product_in_cart(&self, cart_id: &str, product_slug: &str) -> RepoResult<bool> {
        Ok(self
            .carts
            .iter()
            .any(|c| c.id == cart_id && c.contains(product_slug)))
    }
}
