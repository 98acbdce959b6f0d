//! HTTP routes for the storefront
//!
//! JSON endpoints live under `/api`; HTML pages come from [`crate::pages`].

pub mod cart;
pub mod health;
pub mod home;
pub mod menu;
pub mod product;

use axum::Router;
use axum::routing::get;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::pages;
use crate::routes;
use crate::state::AppState;

/// Create the combined router
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    let api = Router::new()
        .route("/api/home", get(home::get_home))
        .route("/api/menu", get(menu::get_menu))
        .route("/api/products/{slug}", get(product::get_by_slug))
        .route("/api/carts/{id}", get(cart::get_cart))
        .route(
            "/api/carts/{id}/contains/{product_slug}",
            get(cart::contains),
        );

    Router::new()
        .route("/health", get(health::health_check))
        .merge(api)
        .merge(pages::router())
        .nest_service(routes::STATIC, ServeDir::new(static_dir))
        .fallback(pages::not_found::fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
