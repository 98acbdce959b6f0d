//! Catalog querying and view-model projection

pub mod navigation;
pub mod query;
pub mod view;

pub use navigation::{FEATURED_PER_CATEGORY, Navigation, build_navigation};
pub use query::{CatalogPage, CatalogQuery, CategorySelection, PAGE_CAP};
pub use view::{
    FilterGroup, FilterId, FilterOption, MenuView, PLACEHOLDER_IMAGE_URL, PostView, ProductCard,
    ProductDetail, project_menu, project_post, project_product_card, project_product_detail,
};
