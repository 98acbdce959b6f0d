//! PostgreSQL catalog backend

use std::collections::HashMap;

use async_trait::async_trait;
use shared::models::{Cart, CartItem, Category, Post, Product};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::{CatalogRepository, CategoryWithProducts, ProductFilter, RepoResult};

const PRODUCT_COLUMNS: &str =
    "p.slug, p.title, p.description, p.price_in_dkk, p.image_src, p.image_alt, p.sort_order";

/// Open a pool and apply pending migrations
pub async fn connect(database_url: &str, max_connections: u32) -> RepoResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}

#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fill `categories` on each product from the junction table. The same
    /// product may appear more than once.
    async fn attach_categories(&self, products: &mut [Product]) -> RepoResult<()> {
        if products.is_empty() {
            return Ok(());
        }

        let slugs: Vec<&str> = products.iter().map(|p| p.slug.as_str()).collect();
        let links: Vec<(String, String)> = sqlx::query_as(
            r#"
            SELECT pc.product_slug, pc.category_slug
            FROM product_categories pc
            JOIN categories c ON c.slug = pc.category_slug
            WHERE pc.product_slug = ANY($1)
            ORDER BY c.sort_order, c.slug
            "#,
        )
        .bind(&slugs)
        .fetch_all(&self.pool)
        .await?;

        let mut by_product: HashMap<String, Vec<String>> = HashMap::new();
        for (product_slug, category_slug) in links {
            by_product.entry(product_slug).or_default().push(category_slug);
        }
        for product in products.iter_mut() {
            product.categories = by_product.get(&product.slug).cloned().unwrap_or_default();
        }
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct FeaturedRow {
    category_slug: String,
    #[sqlx(flatten)]
    product: Product,
}

#[derive(sqlx::FromRow)]
struct CartItemRow {
    quantity: i32,
    #[sqlx(flatten)]
    product: Product,
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(
            "SELECT slug, title, sort_order FROM categories ORDER BY sort_order, slug",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_products(&self, filter: &ProductFilter) -> RepoResult<Vec<Product>> {
        let sql = format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products p
            WHERE cardinality($1::text[]) = 0
               OR EXISTS (
                   SELECT 1 FROM product_categories pc
                   WHERE pc.product_slug = p.slug AND pc.category_slug = ANY($1)
               )
            ORDER BY p.sort_order, p.slug
            LIMIT $2
            "#
        );

        let mut products = sqlx::query_as::<_, Product>(&sql)
            .bind(&filter.categories)
            .bind(i64::try_from(filter.limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        self.attach_categories(&mut products).await?;
        Ok(products)
    }

    async fn find_product(&self, slug: &str) -> RepoResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products p WHERE p.slug = $1");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;

        let Some(product) = product else {
            return Ok(None);
        };
        let mut found = [product];
        self.attach_categories(&mut found).await?;
        let [product] = found;
        Ok(Some(product))
    }

    async fn featured_by_category(
        &self,
        per_category: usize,
    ) -> RepoResult<Vec<CategoryWithProducts>> {
        let categories = self.list_categories().await?;

        let sql = format!(
            r#"
            SELECT c.slug AS category_slug, {PRODUCT_COLUMNS}
            FROM categories c
            CROSS JOIN LATERAL (
                SELECT p.*
                FROM products p
                JOIN product_categories pc ON pc.product_slug = p.slug
                WHERE pc.category_slug = c.slug
                ORDER BY p.sort_order, p.slug
                LIMIT $1
            ) p
            ORDER BY c.sort_order, c.slug, p.sort_order, p.slug
            "#
        );
        let rows = sqlx::query_as::<_, FeaturedRow>(&sql)
            .bind(i64::try_from(per_category).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        let (category_slugs, mut products): (Vec<String>, Vec<Product>) = rows
            .into_iter()
            .map(|row| (row.category_slug, row.product))
            .unzip();
        self.attach_categories(&mut products).await?;

        let mut by_category: HashMap<String, Vec<Product>> = HashMap::new();
        for (category_slug, product) in category_slugs.into_iter().zip(products) {
            by_category.entry(category_slug).or_default().push(product);
        }

        Ok(categories
            .into_iter()
            .map(|category| CategoryWithProducts {
                products: by_category.remove(&category.slug).unwrap_or_default(),
                category,
            })
            .collect())
    }

    async fn list_posts(&self) -> RepoResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, Post>(
            "SELECT slug, title, markdown, created_at FROM posts ORDER BY created_at DESC, slug",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_cart(&self, id: &str) -> RepoResult<Option<Cart>> {
        let cart = sqlx::query_as::<_, Cart>("SELECT id, created_at FROM carts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(mut cart) = cart else {
            return Ok(None);
        };

        let sql = format!(
            r#"
            SELECT ci.quantity, {PRODUCT_COLUMNS}
            FROM cart_items ci
            JOIN products p ON p.slug = ci.product_slug
            WHERE ci.cart_id = $1
            ORDER BY p.sort_order, p.slug
            "#
        );
        let rows = sqlx::query_as::<_, CartItemRow>(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        let mut products: Vec<Product> = Vec::with_capacity(rows.len());
        let mut quantities: Vec<i32> = Vec::with_capacity(rows.len());
        for row in rows {
            quantities.push(row.quantity);
            products.push(row.product);
        }
        self.attach_categories(&mut products).await?;

        cart.items = products
            .into_iter()
            .zip(quantities)
            .map(|(product, quantity)| CartItem { product, quantity })
            .collect();
        Ok(Some(cart))
    }

    async fn product_in_cart(&self, cart_id: &str, product_slug: &str) -> RepoResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM cart_items WHERE cart_id = $1 AND product_slug = $2)",
        )
        .bind(cart_id)
        .bind(product_slug)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
