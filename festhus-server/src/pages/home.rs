//! Front page

use askama::Template;
use axum::extract::State;

use super::{HtmlPage, Layout, PageResult, PageResultExt};
use crate::api::home::load_home;
use crate::catalog::PostView;
use crate::locale::LocalePreference;
use crate::routes;
use crate::state::AppState;

pub struct CollectionItem {
    pub name: &'static str,
    pub href: &'static str,
    pub image_src: &'static str,
    pub image_alt: &'static str,
    pub description: &'static str,
}

pub struct Collection {
    pub name: &'static str,
    pub items: Vec<CollectionItem>,
}

fn collections() -> Vec<Collection> {
    vec![
        Collection {
            name: "Take away",
            items: vec![
                CollectionItem {
                    name: "Take away",
                    href: routes::MENU,
                    image_src: "/static/images/annemedkolde.svg",
                    image_alt: "Anne med \"Take Away\"",
                    description: "Anne laver også den lækreste \"Take Away\" mad og har mange tilbud \
                        for alle Slots Bjergby borgere - og alle andre selvfølgelig!",
                },
                CollectionItem {
                    name: "Kager ud af huset",
                    href: routes::MENU,
                    image_src: "/static/images/fotokager.svg",
                    image_alt: "Kage kollage",
                    description: "Anne er altid klar til at lave din egen personlige kage.",
                },
            ],
        },
        Collection {
            name: "Book festhuset",
            items: vec![
                CollectionItem {
                    name: "Hold dit arrangement hos os",
                    href: routes::ARRANGEMENTS,
                    image_src: "/static/images/borddaekning.svg",
                    image_alt: "Festlige omgivelser",
                    description: "Vi sørger for de bedste omgivelser for dit møde eller arrangement.",
                },
                CollectionItem {
                    name: "En fest hos os?",
                    href: routes::ARRANGEMENTS,
                    image_src: "/static/images/borddaekning.svg",
                    image_alt: "Festlige omgivelser",
                    description: "Lad os stå for en uforglemmelig dag i festlige omgivelser.",
                },
            ],
        },
    ]
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub layout: Layout,
    pub collections: Vec<Collection>,
    pub posts: Vec<PostView>,
}

/// GET /
pub async fn index(
    State(state): State<AppState>,
    locale: LocalePreference,
) -> PageResult<HtmlPage<IndexTemplate>> {
    let locale = locale.primary();
    let data = load_home(&state, locale).await.or_page_error(locale)?;

    let layout = Layout::new(&state, locale, locale.translations().home, data.navigation);
    Ok(HtmlPage::ok(IndexTemplate {
        layout,
        collections: collections(),
        posts: data.posts,
    }))
}
