//! Site navigation
//!
//! Built from scratch for every request and owned by that request's view
//! model. There is no process-wide navigation value to append to.

use serde::Serialize;

use super::view::{ProductCard, project_product_card};
use crate::db::CategoryWithProducts;
use crate::locale::Locale;
use crate::routes;

/// Products shown per category in the navigation flyout
pub const FEATURED_PER_CATEGORY: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavPage {
    pub name: &'static str,
    pub href: &'static str,
    pub current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavCategory {
    pub slug: String,
    pub name: String,
    pub href: String,
    pub featured: Vec<ProductCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub pages: Vec<NavPage>,
    pub categories: Vec<NavCategory>,
}

pub fn build_navigation(
    featured: &[CategoryWithProducts],
    locale: Locale,
    current_path: &str,
) -> Navigation {
    let t = locale.translations();
    let page = |name, href| NavPage {
        name,
        href,
        current: current_path == href,
    };

    Navigation {
        pages: vec![
            page(t.home, routes::INDEX),
            page(t.menu, routes::MENU),
            page(t.arrangements, routes::ARRANGEMENTS),
        ],
        categories: featured
            .iter()
            .map(|entry| NavCategory {
                slug: entry.category.slug.clone(),
                name: entry.category.title.clone(),
                href: routes::menu_category(&entry.category.slug),
                featured: entry
                    .products
                    .iter()
                    .take(FEATURED_PER_CATEGORY)
                    .map(|p| project_product_card(p, locale))
                    .collect(),
            })
            .collect(),
    }
}
