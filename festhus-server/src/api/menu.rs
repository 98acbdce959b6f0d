//! Menu listing API

use axum::Json;
use axum::extract::{RawQuery, State};

use crate::catalog::{CatalogQuery, MenuView, project_menu};
use crate::error::ServiceResult;
use crate::locale::{Locale, LocalePreference};
use crate::state::AppState;

/// Run the catalog query for a raw query string and project it
pub async fn load_menu(
    state: &AppState,
    raw_query: Option<&str>,
    locale: Locale,
) -> ServiceResult<MenuView> {
    let query = CatalogQuery::from_query_string(raw_query);
    let page = query.load(state.catalog.as_ref()).await?;

    tracing::debug!(
        selected = page.selection.len(),
        products = page.products.len(),
        "Loaded menu"
    );
    Ok(project_menu(&page, locale))
}

/// GET /api/menu?category[]=...
pub async fn get_menu(
    State(state): State<AppState>,
    locale: LocalePreference,
    RawQuery(raw_query): RawQuery,
) -> ServiceResult<Json<MenuView>> {
    let view = load_menu(&state, raw_query.as_deref(), locale.primary()).await?;
    Ok(Json(view))
}
