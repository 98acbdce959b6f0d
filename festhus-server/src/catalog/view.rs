//! View Model Projector
//!
//! Pure transforms from catalog records into the shapes pages and the JSON
//! API render. No I/O happens here and missing optional fields are replaced
//! with defaults.

use serde::Serialize;
use shared::models::{Category, Post, Product};

use super::query::{CatalogPage, CategorySelection};
use crate::locale::{FormattedDate, Locale, format_currency, format_date};
use crate::markup::render_markdown;
use crate::routes;

/// Shown for products without an image
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/384x576";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
    pub checked: bool,
}

/// Filterable dimensions. Only categories exist today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterId {
    Category,
}

impl FilterId {
    /// Query key the options of this group are submitted under
    pub fn param(&self) -> &'static str {
        match self {
            Self::Category => "category[]",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterGroup {
    pub id: FilterId,
    pub name: String,
    pub options: Vec<FilterOption>,
}

impl FilterGroup {
    pub fn checked_count(&self) -> usize {
        self.options.iter().filter(|o| o.checked).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub slug: String,
    pub title: String,
    pub href: String,
    pub image_url: String,
    pub image_alt: String,
    pub price: String,
    pub description: String,
}

/// Everything the menu page renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuView {
    pub filters: Vec<FilterGroup>,
    pub products: Vec<ProductCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryLink {
    pub slug: String,
    pub title: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductDetail {
    pub slug: String,
    pub title: String,
    pub description_html: String,
    pub image_url: String,
    pub image_alt: String,
    pub price: String,
    pub categories: Vec<CategoryLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostView {
    pub slug: String,
    pub title: String,
    pub html: String,
    pub date: FormattedDate,
}

/// One option per category, in category order. Selection only toggles
/// `checked`, it never removes an option.
pub fn project_filter_options(
    categories: &[Category],
    selection: &CategorySelection,
) -> Vec<FilterOption> {
    categories
        .iter()
        .map(|c| FilterOption {
            value: c.slug.clone(),
            label: c.title.clone(),
            checked: selection.contains(&c.slug),
        })
        .collect()
}

pub fn project_filter_group(
    categories: &[Category],
    selection: &CategorySelection,
    locale: Locale,
) -> FilterGroup {
    FilterGroup {
        id: FilterId::Category,
        name: locale.translations().category_filter.to_string(),
        options: project_filter_options(categories, selection),
    }
}

pub fn image_url(product: &Product) -> String {
    product
        .image_src
        .as_deref()
        .filter(|src| !src.trim().is_empty())
        .unwrap_or(PLACEHOLDER_IMAGE_URL)
        .to_string()
}

fn image_alt(product: &Product) -> String {
    product
        .image_alt
        .as_deref()
        .filter(|alt| !alt.trim().is_empty())
        .unwrap_or(product.title.as_str())
        .to_string()
}

pub fn project_product_card(product: &Product, locale: Locale) -> ProductCard {
    ProductCard {
        slug: product.slug.clone(),
        title: product.title.clone(),
        href: routes::product(&product.slug),
        image_url: image_url(product),
        image_alt: image_alt(product),
        price: format_currency(product.price_in_dkk, locale),
        description: product.description.clone(),
    }
}

pub fn project_menu(page: &CatalogPage, locale: Locale) -> MenuView {
    MenuView {
        filters: vec![project_filter_group(
            &page.categories,
            &page.selection,
            locale,
        )],
        products: page
            .products
            .iter()
            .map(|p| project_product_card(p, locale))
            .collect(),
    }
}

/// `categories` is the full category list; only those the product belongs
/// to are linked, in category order.
pub fn project_product_detail(
    product: &Product,
    categories: &[Category],
    locale: Locale,
) -> ProductDetail {
    ProductDetail {
        slug: product.slug.clone(),
        title: product.title.clone(),
        description_html: render_markdown(&product.description),
        image_url: image_url(product),
        image_alt: image_alt(product),
        price: format_currency(product.price_in_dkk, locale),
        categories: categories
            .iter()
            .filter(|c| product.in_category(&c.slug))
            .map(|c| CategoryLink {
                slug: c.slug.clone(),
                title: c.title.clone(),
                href: routes::menu_category(&c.slug),
            })
            .collect(),
    }
}

pub fn project_post(post: &Post, locale: Locale) -> PostView {
    PostView {
        slug: post.slug.clone(),
        title: post.title.clone(),
        html: render_markdown(&post.markdown),
        date: format_date(post.created_at, locale),
    }
}
