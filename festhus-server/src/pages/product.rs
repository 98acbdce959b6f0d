//! Product detail page

use askama::Template;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};

use super::{HtmlPage, Layout, PageResult, PageResultExt};
use crate::api::home::load_navigation;
use crate::api::product::load_product;
use crate::catalog::ProductDetail;
use crate::locale::LocalePreference;
use crate::routes;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "product.html")]
pub struct ProductTemplate {
    pub layout: Layout,
    pub product: ProductDetail,
}

/// GET /produkt/{slug}
///
/// Unknown slugs redirect to the not-found page instead of rendering.
pub async fn product_page(
    State(state): State<AppState>,
    locale: LocalePreference,
    Path(slug): Path<String>,
) -> PageResult<Response> {
    let locale = locale.primary();
    let current = routes::product(&slug);
    let (navigation, product) = tokio::try_join!(
        load_navigation(&state, locale, &current),
        load_product(&state, &slug, locale)
    )
    .or_page_error(locale)?;

    let Some(product) = product else {
        tracing::debug!(slug = %slug, "Unknown product, redirecting");
        return Ok(Redirect::to(routes::NOT_FOUND).into_response());
    };

    let layout = Layout::new(&state, locale, product.title.clone(), navigation);
    Ok(HtmlPage::ok(ProductTemplate { layout, product }).into_response())
}

/// GET /produkt/
pub async fn missing_slug() -> Redirect {
    Redirect::to(routes::NOT_FOUND)
}
