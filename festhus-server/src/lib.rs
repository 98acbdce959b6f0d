//! Storefront for Slots Bjergby Festhus
//!
//! Server-rendered menu, product pages and a small JSON API over a catalog
//! of categories, products, posts and carts.
//!
//! # Layout
//!
//! - [`catalog`]: query building, view-model projection and navigation
//! - [`db`]: the [`db::CatalogRepository`] seam with PostgreSQL and
//!   in-memory backends
//! - [`api`] / [`pages`]: JSON handlers and askama pages
//! - [`locale`]: `Accept-Language` negotiation, currency and date formatting

pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod locale;
pub mod logger;
pub mod markup;
pub mod pages;
pub mod routes;
pub mod state;

pub use api::create_router;
pub use config::Config;
pub use state::AppState;
