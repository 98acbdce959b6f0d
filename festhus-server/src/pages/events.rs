//! Events page

use askama::Template;
use axum::extract::State;

use super::{HtmlPage, Layout, PageResult, PageResultExt};
use crate::api::home::load_navigation;
use crate::locale::LocalePreference;
use crate::routes;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "events.html")]
pub struct EventsTemplate {
    pub layout: Layout,
}

/// GET /arrangementer
pub async fn events_page(
    State(state): State<AppState>,
    locale: LocalePreference,
) -> PageResult<HtmlPage<EventsTemplate>> {
    let locale = locale.primary();
    let navigation = load_navigation(&state, locale, routes::ARRANGEMENTS)
        .await
        .or_page_error(locale)?;

    let layout = Layout::new(&state, locale, locale.translations().arrangements, navigation);
    Ok(HtmlPage::ok(EventsTemplate { layout }))
}
