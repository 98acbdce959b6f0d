//! Catalog Query Builder
//!
//! Turns the raw query string of a menu request into the two catalog reads
//! behind the page: every category (for the filter options) and a capped
//! product listing restricted to the selected categories.

use indexmap::IndexSet;
use shared::models::{Category, Product};
use url::form_urlencoded;

use crate::db::{CatalogRepository, ProductFilter, RepoResult};

/// Maximum number of products on one listing
pub const PAGE_CAP: usize = 15;

/// Distinct slugs kept from one request; extra values are dropped
pub const MAX_SELECTED_CATEGORIES: usize = 32;

const CATEGORY_KEYS: [&str; 2] = ["category[]", "category"];

/// Ordered, de-duplicated set of requested category slugs.
///
/// Empty means "no filter". Unknown slugs are kept and simply match nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySelection {
    slugs: IndexSet<String>,
}

impl CategorySelection {
    /// Parse repeated `category[]` (or `category`) values from a raw query
    /// string. A value with a broken percent-escape or invalid UTF-8 makes
    /// the whole query malformed, which yields an empty selection.
    pub fn from_query(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };

        let mut slugs = IndexSet::new();
        for pair in raw.split('&').filter(|p| !p.is_empty()) {
            let Some((key, value)) = form_urlencoded::parse(pair.as_bytes()).next() else {
                continue;
            };
            if !CATEGORY_KEYS.contains(&&*key) {
                continue;
            }

            let encoded = pair.split_once('=').map_or("", |(_, v)| v);
            if has_broken_escape(encoded) || value.contains(char::REPLACEMENT_CHARACTER) {
                tracing::debug!(query = raw, "Malformed category filter, ignoring selection");
                return Self::default();
            }

            let slug = value.trim();
            if slug.is_empty() || slugs.len() >= MAX_SELECTED_CATEGORIES {
                continue;
            }
            slugs.insert(slug.to_string());
        }

        Self { slugs }
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.slugs.contains(slug)
    }

    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slugs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.slugs.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for CategorySelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            slugs: iter
                .into_iter()
                .map(Into::into)
                .take(MAX_SELECTED_CATEGORIES)
                .collect(),
        }
    }
}

/// Whether some `%` is not followed by two hex digits
fn has_broken_escape(encoded: &str) -> bool {
    let bytes = encoded.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        match bytes.get(i + 1..i + 3) {
            Some(hex) if hex.iter().all(u8::is_ascii_hexdigit) => i += 3,
            _ => return true,
        }
    }
    false
}

/// A parsed menu request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub selection: CategorySelection,
    pub limit: usize,
}

impl CatalogQuery {
    pub fn new(selection: CategorySelection) -> Self {
        Self {
            selection,
            limit: PAGE_CAP,
        }
    }

    pub fn from_query_string(raw: Option<&str>) -> Self {
        Self::new(CategorySelection::from_query(raw))
    }

    pub fn product_filter(&self) -> ProductFilter {
        ProductFilter::in_categories(self.selection.iter().map(str::to_string).collect(), self.limit)
    }

    /// Issue both reads concurrently. Store failures propagate unchanged.
    pub async fn load(&self, repo: &dyn CatalogRepository) -> RepoResult<CatalogPage> {
        let filter = self.product_filter();
        let (categories, mut products) =
            tokio::try_join!(repo.list_categories(), repo.list_products(&filter))?;

        // backends already cap, this keeps the bound independent of them
        products.truncate(self.limit);

        Ok(CatalogPage {
            selection: self.selection.clone(),
            categories,
            products,
        })
    }
}

/// Raw result of a catalog query, before projection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage {
    pub selection: CategorySelection,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
}
