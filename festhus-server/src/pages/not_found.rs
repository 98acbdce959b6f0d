//! Not-found page and router fallback

use askama::Template;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use shared::error::AppError;

use super::{HtmlPage, Layout, static_navigation};
use crate::api::home::load_navigation;
use crate::locale::{Locale, LocalePreference};
use crate::routes;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub layout: Layout,
}

/// Render the 404 page. A storage failure here degrades to page links only.
async fn render(state: &AppState, locale: Locale) -> HtmlPage<NotFoundTemplate> {
    let navigation = match load_navigation(state, locale, routes::NOT_FOUND).await {
        Ok(navigation) => navigation,
        Err(e) => {
            tracing::warn!(error = ?e, "Navigation unavailable on not-found page");
            static_navigation(locale)
        }
    };

    let layout = Layout::new(
        state,
        locale,
        locale.translations().not_found_title,
        navigation,
    );
    HtmlPage::with_status(StatusCode::NOT_FOUND, NotFoundTemplate { layout })
}

/// GET /404
pub async fn not_found_page(
    State(state): State<AppState>,
    locale: LocalePreference,
) -> HtmlPage<NotFoundTemplate> {
    render(&state, locale.primary()).await
}

/// Unmatched routes: JSON error under `/api`, the 404 page elsewhere
pub async fn fallback(
    State(state): State<AppState>,
    locale: LocalePreference,
    uri: Uri,
) -> Response {
    if uri.path().starts_with("/api/") {
        return AppError::not_found(format!("Route {}", uri.path())).into_response();
    }
    render(&state, locale.primary()).await.into_response()
}
