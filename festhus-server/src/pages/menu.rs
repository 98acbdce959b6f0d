//! Menu listing page with category filters

use askama::Template;
use axum::extract::{RawQuery, State};

use super::{HtmlPage, Layout, PageResult, PageResultExt};
use crate::api::home::load_navigation;
use crate::api::menu::load_menu;
use crate::catalog::MenuView;
use crate::locale::LocalePreference;
use crate::routes;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "menu.html")]
pub struct MenuTemplate {
    pub layout: Layout,
    pub menu: MenuView,
}

/// GET /menu?category[]=...
pub async fn menu_page(
    State(state): State<AppState>,
    locale: LocalePreference,
    RawQuery(raw_query): RawQuery,
) -> PageResult<HtmlPage<MenuTemplate>> {
    let locale = locale.primary();
    let (navigation, menu) = tokio::try_join!(
        load_navigation(&state, locale, routes::MENU),
        load_menu(&state, raw_query.as_deref(), locale)
    )
    .or_page_error(locale)?;

    let layout = Layout::new(&state, locale, locale.translations().menu, navigation);
    Ok(HtmlPage::ok(MenuTemplate { layout, menu }))
}
