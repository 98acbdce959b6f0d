//! Server-rendered HTML pages
//!
//! Each page loads its data through the same loaders as the JSON API and
//! renders an askama template. Every page carries a freshly built
//! [`Layout`] (navigation, footer, UI strings).

pub mod events;
pub mod home;
pub mod menu;
pub mod not_found;
pub mod product;

use std::sync::Arc;

use askama::Template;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use chrono::{Datelike, Utc};
use shared::error::{AppError, ErrorCode};

use crate::catalog::{Navigation, build_navigation};
use crate::config::SiteInfo;
use crate::error::ServiceError;
use crate::locale::{Locale, Translations};
use crate::routes;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(routes::INDEX, get(home::index))
        .route(routes::MENU, get(menu::menu_page))
        .route("/produkt/{slug}", get(product::product_page))
        .route("/produkt/", get(product::missing_slug))
        .route(routes::ARRANGEMENTS, get(events::events_page))
        .route(routes::NOT_FOUND, get(not_found::not_found_page))
}

/// Data shared by every page template
pub struct Layout {
    pub lang: &'static str,
    pub t: &'static Translations,
    pub title: String,
    pub navigation: Navigation,
    pub site: Arc<SiteInfo>,
    pub year: i32,
}

impl Layout {
    pub fn new(
        state: &AppState,
        locale: Locale,
        title: impl Into<String>,
        navigation: Navigation,
    ) -> Self {
        Self {
            lang: locale.lang(),
            t: locale.translations(),
            title: title.into(),
            navigation,
            site: state.site.clone(),
            year: Utc::now().year(),
        }
    }
}

/// A rendered template as an HTML response
pub struct HtmlPage<T> {
    status: StatusCode,
    template: T,
}

impl<T: Template> HtmlPage<T> {
    pub fn ok(template: T) -> Self {
        Self {
            status: StatusCode::OK,
            template,
        }
    }

    pub fn with_status(status: StatusCode, template: T) -> Self {
        Self { status, template }
    }
}

impl<T: Template> IntoResponse for HtmlPage<T> {
    fn into_response(self) -> Response {
        match self.template.render() {
            Ok(html) => (self.status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!(code = %ErrorCode::TemplateError, error = %e, "Template render failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(FALLBACK_ERROR_HTML),
                )
                    .into_response()
            }
        }
    }
}

const FALLBACK_ERROR_HTML: &str =
    "<!DOCTYPE html><html><head><title>Fejl</title></head><body><h1>Der opstod en fejl</h1></body></html>";

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    lang: &'a str,
    t: &'a Translations,
    status: u16,
}

/// Failure while assembling a page, rendered as an HTML error page
#[derive(Debug)]
pub struct PageError {
    error: AppError,
    locale: Locale,
}

impl PageError {
    pub fn new(error: impl Into<ServiceError>, locale: Locale) -> Self {
        Self {
            error: AppError::from(error.into()),
            locale,
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.error.http_status();
        HtmlPage::with_status(
            status,
            ErrorTemplate {
                lang: self.locale.lang(),
                t: self.locale.translations(),
                status: status.as_u16(),
            },
        )
        .into_response()
    }
}

pub type PageResult<T> = Result<T, PageError>;

/// Attach the request locale to a failed page load
pub trait PageResultExt<T> {
    fn or_page_error(self, locale: Locale) -> PageResult<T>;
}

impl<T, E: Into<ServiceError>> PageResultExt<T> for Result<T, E> {
    fn or_page_error(self, locale: Locale) -> PageResult<T> {
        self.map_err(|e| PageError::new(e, locale))
    }
}

/// Navigation for pages rendered without catalog access
pub fn static_navigation(locale: Locale) -> Navigation {
    build_navigation(&[], locale, "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::RepoError;

    #[test]
    fn test_page_error_status() {
        let err = PageError::new(RepoError::Database("down".into()), Locale::DaDk);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_template_renders_locale() {
        let html = ErrorTemplate {
            lang: "en",
            t: Locale::EnGb.translations(),
            status: 500,
        }
        .render()
        .unwrap();
        assert!(html.contains("lang=\"en\""));
        assert!(html.contains("Something went wrong"));
    }

    #[test]
    fn test_static_navigation_has_pages_only() {
        let nav = static_navigation(Locale::DaDk);
        assert_eq!(nav.pages.len(), 3);
        assert!(nav.categories.is_empty());
    }
}
