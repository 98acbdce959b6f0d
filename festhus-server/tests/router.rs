use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use festhus_server::catalog::{PAGE_CAP, PLACEHOLDER_IMAGE_URL};
use festhus_server::db::{
    CatalogRepository, CategoryWithProducts, MemoryCatalogRepository, ProductFilter, RepoError,
    RepoResult, seed,
};
use festhus_server::{AppState, Config, create_router};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::Value;
use shared::models::{Cart, Category, Post, Product};
use tower::ServiceExt;

fn app() -> Router {
    let repo = MemoryCatalogRepository::from_fixtures(seed::fixtures());
    let state = AppState::with_repository(&Config::memory(), Arc::new(repo));
    create_router(state, "public")
}

async fn send(
    app: Router,
    uri: &str,
    accept_language: Option<&str>,
) -> (StatusCode, HeaderMap, String) {
    let mut request = Request::builder().uri(uri);
    if let Some(lang) = accept_language {
        request = request.header(header::ACCEPT_LANGUAGE, lang);
    }
    let response = app
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(uri: &str, accept_language: Option<&str>) -> (StatusCode, Value) {
    let (status, _, body) = send(app(), uri, accept_language).await;
    (status, serde_json::from_str(&body).unwrap())
}

fn slugs_in(category: &str) -> HashSet<String> {
    seed::fixtures()
        .products
        .into_iter()
        .filter(|p| p.in_category(category))
        .map(|p| p.slug)
        .collect()
}

fn product_slugs(menu: &Value) -> Vec<String> {
    menu["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap().to_string())
        .collect()
}

fn checked_options(menu: &Value) -> Vec<(String, bool)> {
    menu["filters"][0]["options"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| {
            (
                o["value"].as_str().unwrap().to_string(),
                o["checked"].as_bool().unwrap(),
            )
        })
        .collect()
}

// =============================================================================
// Menu
// =============================================================================

#[tokio::test]
async fn test_menu_without_query() {
    let (status, menu) = get_json("/api/menu", None).await;
    assert_eq!(status, StatusCode::OK);

    let filters = menu["filters"].as_array().unwrap();
    assert_eq!(filters.len(), 1);
    assert_eq!(filters[0]["id"], "category");
    assert_eq!(filters[0]["name"], "Produkt kategori");
    assert_eq!(
        checked_options(&menu),
        vec![
            ("take-away".to_string(), false),
            ("forret".to_string(), false),
            ("hovedretter".to_string(), false),
            ("desserter".to_string(), false),
        ]
    );

    let products = menu["products"].as_array().unwrap();
    assert_eq!(products.len(), PAGE_CAP);
    assert_eq!(products[0]["slug"], "rejecocktail");
    assert_eq!(products[0]["price"], "39,00 kr.");
}

#[tokio::test]
async fn test_menu_single_category() {
    let (_, menu) = get_json("/api/menu?category[]=forret", None).await;

    let checked: Vec<String> = checked_options(&menu)
        .into_iter()
        .filter(|(_, checked)| *checked)
        .map(|(value, _)| value)
        .collect();
    assert_eq!(checked, vec!["forret".to_string()]);

    let forret = slugs_in("forret");
    let slugs = product_slugs(&menu);
    assert!(!slugs.is_empty());
    assert!(slugs.len() <= PAGE_CAP);
    assert!(slugs.iter().all(|s| forret.contains(s)));
}

#[tokio::test]
async fn test_menu_union_of_categories() {
    let (_, menu) = get_json("/api/menu?category[]=forret&category[]=desserter", None).await;

    let options = checked_options(&menu);
    assert!(options.contains(&("forret".to_string(), true)));
    assert!(options.contains(&("desserter".to_string(), true)));
    assert!(options.contains(&("hovedretter".to_string(), false)));

    let allowed: HashSet<String> = slugs_in("forret")
        .union(&slugs_in("desserter"))
        .cloned()
        .collect();
    let slugs = product_slugs(&menu);
    assert_eq!(slugs.len(), PAGE_CAP);
    assert!(slugs.iter().all(|s| allowed.contains(s)));

    let unique: HashSet<&String> = slugs.iter().collect();
    assert_eq!(unique.len(), slugs.len());
}

#[tokio::test]
async fn test_menu_unknown_category_matches_nothing() {
    let (status, menu) = get_json("/api/menu?category[]=findes-ikke", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(product_slugs(&menu).is_empty());
    assert_eq!(checked_options(&menu).len(), 4);
}

#[tokio::test]
async fn test_menu_encoded_key() {
    let (_, encoded) = get_json("/api/menu?category%5B%5D=desserter", None).await;
    let (_, plain) = get_json("/api/menu?category[]=desserter", None).await;
    assert_eq!(encoded, plain);
}

#[tokio::test]
async fn test_menu_malformed_query_is_unfiltered() {
    let (status, menu) = get_json("/api/menu?category[]=forret&category[]=%FF", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(checked_options(&menu).iter().all(|(_, checked)| !checked));
    assert_eq!(product_slugs(&menu).len(), PAGE_CAP);
}

#[tokio::test]
async fn test_menu_broken_escape_is_unfiltered() {
    let (_, unfiltered) = get_json("/api/menu", None).await;

    for uri in ["/api/menu?category[]=%ZZ", "/api/menu?category[]=forret&category[]=%4"] {
        let (status, menu) = get_json(uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(checked_options(&menu).iter().all(|(_, checked)| !checked));
        assert_eq!(product_slugs(&menu), product_slugs(&unfiltered));
    }
}

#[tokio::test]
async fn test_menu_large_category_is_capped() {
    let (_, menu) = get_json("/api/menu?category[]=take-away", None).await;

    // every seeded dish is take-away, more than one page worth
    let take_away = slugs_in("take-away");
    assert!(take_away.len() > PAGE_CAP);

    let slugs = product_slugs(&menu);
    assert_eq!(slugs.len(), PAGE_CAP);
    assert!(slugs.iter().all(|s| take_away.contains(s)));
}

#[tokio::test]
async fn test_menu_images_fall_back_to_placeholder() {
    let (_, menu) = get_json("/api/menu?category[]=forret", None).await;
    let products = menu["products"].as_array().unwrap();

    let reje = products.iter().find(|p| p["slug"] == "rejecocktail").unwrap();
    assert_eq!(reje["image_url"], PLACEHOLDER_IMAGE_URL);
    assert_eq!(reje["image_alt"], "Rejecocktail");

    let tun = products.iter().find(|p| p["slug"] == "tunmousse").unwrap();
    assert_eq!(tun["image_url"], "/static/images/forret-tunmousse.svg");
}

#[tokio::test]
async fn test_menu_is_idempotent() {
    let (_, _, first) = send(app(), "/api/menu?category[]=hovedretter", None).await;
    let (_, _, second) = send(app(), "/api/menu?category[]=hovedretter", None).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_menu_english_locale() {
    let (_, menu) = get_json("/api/menu", Some("en-GB,en;q=0.8,da;q=0.5")).await;
    assert_eq!(menu["filters"][0]["name"], "Category");
    assert_eq!(menu["products"][0]["price"], "DKK 39.00");
}

#[tokio::test]
async fn test_menu_page_marks_checked_options() {
    let (status, headers, html) = send(app(), "/menu?category[]=forret", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
    assert!(html.contains("lang=\"da\""));
    assert!(html.contains("Produkt kategori"));
    assert!(html.contains("value=\"forret\" checked"));
    assert!(!html.contains("value=\"desserter\" checked"));
    assert!(html.contains("Rejecocktail"));
    assert!(!html.contains("Brownie</h3>"));
}

// =============================================================================
// Product detail
// =============================================================================

#[tokio::test]
async fn test_unknown_product_redirects() {
    let (status, headers, _) = send(app(), "/produkt/findes-ikke", None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/404");

    let (status, headers, _) = send(app(), "/produkt/", None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[header::LOCATION], "/404");
}

#[tokio::test]
async fn test_product_page_renders() {
    let (status, _, html) = send(app(), "/produkt/pandekager-med-vanilje-is", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Pandekager med vanilje is"));
    assert!(html.contains("39,00 kr."));
    assert!(html.contains("<em>Mums mums.</em>"));
}

#[tokio::test]
async fn test_product_api() {
    let (status, product) = get_json("/api/products/brownie", Some("en-US")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["title"], "Brownie");
    assert_eq!(product["price"], "DKK 39.00");
    assert_eq!(product["image_url"], PLACEHOLDER_IMAGE_URL);
    assert_eq!(
        product["description_html"],
        "<p>Hjemmelavet brownie med vaniljeis og frugt.</p>\n"
    );
    let categories: Vec<&str> = product["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["slug"].as_str().unwrap())
        .collect();
    assert_eq!(categories, ["take-away", "desserter"]);
}

#[tokio::test]
async fn test_product_api_not_found() {
    let (status, body) = get_json("/api/products/findes-ikke", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6001);
    assert_eq!(body["details"]["slug"], "findes-ikke");
}

// =============================================================================
// Home, carts, service endpoints
// =============================================================================

#[tokio::test]
async fn test_home_api() {
    let (status, home) = get_json("/api/home", None).await;
    assert_eq!(status, StatusCode::OK);

    let pages: Vec<&str> = home["navigation"]["pages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(pages, ["Forside", "Menukort", "Arrangementer"]);
    assert_eq!(home["navigation"]["pages"][0]["current"], true);

    let categories = home["navigation"]["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 4);
    assert!(
        categories
            .iter()
            .all(|c| c["featured"].as_array().unwrap().len() <= 3)
    );

    let post = &home["posts"][0];
    assert_eq!(post["slug"], "fra-festhuset-2022");
    assert_eq!(post["date"]["iso"], "2022-05-01T12:00:00.000Z");
    assert_eq!(post["date"]["display"], "1. maj 2022");
}

#[tokio::test]
async fn test_home_page_renders() {
    let (status, _, html) = send(app(), "/", Some("da-DK")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Book festhuset"));
    assert!(html.contains("Fra Festhuset 2022"));
    assert!(html.contains("datetime=\"2022-05-01T12:00:00.000Z\""));
    assert!(html.contains("2014 4080"));
}

#[tokio::test]
async fn test_linked_images_are_served() {
    let (_, _, home) = send(app(), "/", None).await;
    let (_, _, menu) = send(app(), "/menu?category[]=forret", None).await;

    let mut paths: Vec<String> = Vec::new();
    for html in [&home, &menu] {
        for chunk in html.split("src=\"/static/images/").skip(1) {
            let name = chunk.split('"').next().unwrap();
            paths.push(format!("/static/images/{name}"));
        }
    }
    paths.sort();
    paths.dedup();
    assert!(paths.contains(&"/static/images/forret-tunmousse.svg".to_string()));

    for path in paths {
        let (status, headers, _) = send(app(), &path, None).await;
        assert_eq!(status, StatusCode::OK, "{path}");
        assert_eq!(headers[header::CONTENT_TYPE], "image/svg+xml", "{path}");
    }
}

#[tokio::test]
async fn test_navigation_does_not_accumulate() {
    let (_, first) = get_json("/api/home", None).await;
    for _ in 0..3 {
        let _ = send(app(), "/menu", None).await;
    }
    let (_, again) = get_json("/api/home", None).await;
    assert_eq!(first["navigation"], again["navigation"]);
}

#[tokio::test]
async fn test_cart_api() {
    let (status, cart) = get_json("/api/carts/demo", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["item_count"], 3);
    assert_eq!(cart["items"][0]["product"]["slug"], "rejecocktail");
    assert_eq!(cart["items"][0]["quantity"], 2);

    let (_, contains) = get_json("/api/carts/demo/contains/brownie", None).await;
    assert_eq!(contains["in_cart"], true);

    let (_, contains) = get_json("/api/carts/demo/contains/lakserose", None).await;
    assert_eq!(contains["in_cart"], false);
}

#[tokio::test]
async fn test_cart_not_found() {
    let (status, body) = get_json("/api/carts/ukendt", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6301);
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get_json("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "festhus-server");
}

#[tokio::test]
async fn test_not_found_pages() {
    let (status, _, html) = send(app(), "/404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Siden blev ikke fundet"));

    let (status, _, html) = send(app(), "/findes/ikke", Some("en")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Page not found"));

    let (status, body) = get_json("/api/findes-ikke", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3);
}

// =============================================================================
// Storage failures
// =============================================================================

struct UnavailableRepository;

#[async_trait]
impl CatalogRepository for UnavailableRepository {
    async fn list_categories(&self) -> RepoResult<Vec<Category>> {
        Err(RepoError::Database("connection refused".into()))
    }

    async fn list_products(&self, _filter: &ProductFilter) -> RepoResult<Vec<Product>> {
        Err(RepoError::Database("connection refused".into()))
    }

    async fn find_product(&self, _slug: &str) -> RepoResult<Option<Product>> {
        Err(RepoError::Database("connection refused".into()))
    }

    async fn featured_by_category(&self, _per: usize) -> RepoResult<Vec<CategoryWithProducts>> {
        Err(RepoError::Database("connection refused".into()))
    }

    async fn list_posts(&self) -> RepoResult<Vec<Post>> {
        Err(RepoError::Database("connection refused".into()))
    }

    async fn find_cart(&self, _id: &str) -> RepoResult<Option<Cart>> {
        Err(RepoError::Database("connection refused".into()))
    }

    async fn product_in_cart(&self, _cart_id: &str, _slug: &str) -> RepoResult<bool> {
        Err(RepoError::Database("connection refused".into()))
    }
}

fn broken_app() -> Router {
    let state = AppState::with_repository(&Config::memory(), Arc::new(UnavailableRepository));
    create_router(state, "public")
}

#[tokio::test]
async fn test_storage_failure_is_propagated() {
    let (status, _, body) = send(broken_app(), "/api/menu", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["code"], 9001);
    assert!(!body.to_string().contains("connection refused"));

    let (status, _, html) = send(broken_app(), "/menu", Some("en-GB")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(html.contains("Something went wrong"));
}

#[tokio::test]
async fn test_not_found_page_survives_storage_failure() {
    let (status, _, html) = send(broken_app(), "/404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Forside"));
}
