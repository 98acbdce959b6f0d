//! Home page API

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::catalog::{FEATURED_PER_CATEGORY, Navigation, PostView, build_navigation, project_post};
use crate::error::{ServiceError, ServiceResult};
use crate::locale::{Locale, LocalePreference};
use crate::routes;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct HomeData {
    pub navigation: Navigation,
    pub posts: Vec<PostView>,
}

/// Navigation for the page at `current_path`, built fresh for this request
pub async fn load_navigation(
    state: &AppState,
    locale: Locale,
    current_path: &str,
) -> ServiceResult<Navigation> {
    let featured = state
        .catalog
        .featured_by_category(FEATURED_PER_CATEGORY)
        .await?;
    Ok(build_navigation(&featured, locale, current_path))
}

pub async fn load_home(state: &AppState, locale: Locale) -> ServiceResult<HomeData> {
    let (navigation, posts) = tokio::try_join!(
        load_navigation(state, locale, routes::INDEX),
        async { state.catalog.list_posts().await.map_err(ServiceError::from) }
    )?;

    Ok(HomeData {
        navigation,
        posts: posts.iter().map(|p| project_post(p, locale)).collect(),
    })
}

/// GET /api/home
pub async fn get_home(
    State(state): State<AppState>,
    locale: LocalePreference,
) -> ServiceResult<Json<HomeData>> {
    let data = load_home(&state, locale.primary()).await?;
    Ok(Json(data))
}
