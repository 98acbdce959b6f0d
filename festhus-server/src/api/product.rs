//! Product detail API

use axum::Json;
use axum::extract::{Path, State};
use shared::error::{AppError, ErrorCode};

use crate::catalog::{ProductDetail, project_product_detail};
use crate::error::ServiceResult;
use crate::locale::{Locale, LocalePreference};
use crate::state::AppState;

/// Product detail view, `None` when no product has this slug
pub async fn load_product(
    state: &AppState,
    slug: &str,
    locale: Locale,
) -> ServiceResult<Option<ProductDetail>> {
    let slug = slug.trim();
    if slug.is_empty() {
        return Ok(None);
    }

    let (product, categories) = tokio::try_join!(
        state.catalog.find_product(slug),
        state.catalog.list_categories()
    )?;

    Ok(product.map(|p| project_product_detail(&p, &categories, locale)))
}

/// GET /api/products/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    locale: LocalePreference,
    Path(slug): Path<String>,
) -> ServiceResult<Json<ProductDetail>> {
    let detail = load_product(&state, &slug, locale.primary())
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound).with_detail("slug", slug))?;
    Ok(Json(detail))
}
