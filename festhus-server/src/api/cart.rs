//! Cart API (read-only)

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::Cart;

use crate::catalog::{ProductCard, project_product_card};
use crate::error::ServiceResult;
use crate::locale::{Locale, LocalePreference};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub product: ProductCard,
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub id: String,
    pub items: Vec<CartLine>,
    pub item_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct InCart {
    pub in_cart: bool,
}

fn project_cart(cart: &Cart, locale: Locale) -> CartView {
    CartView {
        id: cart.id.clone(),
        items: cart
            .items
            .iter()
            .map(|item| CartLine {
                product: project_product_card(&item.product, locale),
                quantity: item.quantity,
            })
            .collect(),
        item_count: cart.item_count(),
    }
}

/// GET /api/carts/{id}
pub async fn get_cart(
    State(state): State<AppState>,
    locale: LocalePreference,
    Path(id): Path<String>,
) -> ServiceResult<Json<CartView>> {
    let cart = state
        .catalog
        .find_cart(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CartNotFound).with_detail("cart_id", id))?;

    Ok(Json(project_cart(&cart, locale.primary())))
}

/// GET /api/carts/{id}/contains/{product_slug}
pub async fn contains(
    State(state): State<AppState>,
    Path((id, product_slug)): Path<(String, String)>,
) -> ServiceResult<Json<InCart>> {
    let in_cart = state.catalog.product_in_cart(&id, &product_slug).await?;
    Ok(Json(InCart { in_cart }))
}
