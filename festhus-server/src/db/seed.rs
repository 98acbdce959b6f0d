//! Sample catalog
//!
//! Four categories, the take-away menu and one news post. The memory backend
//! is built from these; `SEED_ON_START=true` upserts them into PostgreSQL.

use chrono::{DateTime, TimeZone, Utc};
use shared::models::{Cart, CartItem, Category, Post, Product};
use sqlx::PgPool;

use super::RepoResult;

/// Cart present in the fixtures so the cart endpoints have data
pub const DEMO_CART_ID: &str = "demo";

#[derive(Debug, Clone)]
pub struct Fixtures {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub posts: Vec<Post>,
    pub carts: Vec<Cart>,
}

const TAKE_AWAY: &str = "take-away";
const FORRET: &str = "forret";
const HOVEDRETTER: &str = "hovedretter";
const DESSERTER: &str = "desserter";

/// (slug, title, price, course, description)
const MENU: &[(&str, &str, i64, &str, &str)] = &[
    (
        "rejecocktail",
        "Rejecocktail",
        39,
        FORRET,
        "med rejer, asparges, citron, kaviar samt rød dressing inkl. Brød og smør",
    ),
    (
        "tunmousse",
        "Tunmousse",
        39,
        FORRET,
        "med rejer, asparges, citron samt dild dressing inkl. Brød og smør",
    ),
    ("indbagt-laks", "Indbagt laks", 35, FORRET, "med flødestuvet spinat"),
    (
        "hoensesalat",
        "Hønsesalat anrettet på ananasring",
        39,
        FORRET,
        "anrettet på sprød salat bund med bacon inkl. Brød og smør",
    ),
    ("tarteletter", "Tarteletter", 35, FORRET, "med høns i asparges - 3 stk. pr. person."),
    (
        "lakseroulade",
        "Lakseroulade",
        39,
        FORRET,
        "med flødeostecreme, pyntet med rejer dild dressing inkl. Brød og smør",
    ),
    ("lakserose", "Lakserose", 39, FORRET, "på sprød salat bund, med dressing inkl. Brød og smør"),
    (
        "kalvesteg-med-vildtsauce",
        "Kalvesteg stegt som vildt",
        115,
        HOVEDRETTER,
        "Kalvesteg, waldorfsalat, hvide kartofler, tyttebær, agurkesalat, friske grøntsager samt vildtsauce",
    ),
    (
        "rosa-kalvefilet",
        "Rosa stegt kalvefilet",
        115,
        HOVEDRETTER,
        "Kalvefilet, sauterede grøntsager, smørristede kartofler samt sauce efter eget valg",
    ),
    (
        "helstegt-oksestriploin",
        "Helstegt oksestriploin",
        125,
        HOVEDRETTER,
        "Oksestriploin, sauterede grøntsager, broccolitimbale, smørristede kartofler samt sauce efter eget valg",
    ),
    (
        "gammeldags-oksesteg",
        "Gammeldags oksesteg",
        125,
        HOVEDRETTER,
        "Gammeldags oksesteg, glaserede perleløg, kogte gulerødder, tomater med peberrodssalat, hvide kartofler samt kraftig oksestegssauce",
    ),
    (
        "helstegt-svinekam",
        "Helstegt svinekam",
        99,
        HOVEDRETTER,
        "Helstegt svinekam m. hvide, brune, rødkål og franske kartofler, samt sauce.",
    ),
    (
        "svinekam-stegt-som-vildt",
        "Svinekam stegt som vildt",
        99,
        HOVEDRETTER,
        "Svinekam stegt som vildt m. tyttebær, waldorfsalat, hvide og brune kartofler samt vildtsauce.",
    ),
    ("frugttaerte", "Frugttærte", 39, DESSERTER, "med flødeskum og creme fraiche"),
    ("hjemmelavet-is", "Hjemmelavet is", 39, DESSERTER, "med frisk frugt og jordbærskum"),
    (
        "pandekager-med-vanilje-is",
        "Pandekager med vanilje is",
        39,
        DESSERTER,
        "Lækker pandekage med vanilje is og syltetøj. *Mums mums.*",
    ),
    (
        "fragilite-roulade",
        "Fragilitéroulade",
        42,
        DESSERTER,
        "med is, pyntet med frugt og chokolade.",
    ),
    ("noedde-kurv", "Nøddekurv", 45, DESSERTER, "med chokolade, is og frugt"),
    ("citron-fromage", "Citron fromage", 39, DESSERTER, "Citron fromage, med flødeskum."),
    (
        "appelsin-fromage",
        "Appelsin fromage",
        39,
        DESSERTER,
        "Appelsinfromage, med hvidchokolade flødeskum.",
    ),
    ("brownie", "Brownie", 39, DESSERTER, "Hjemmelavet brownie med vaniljeis og frugt."),
];

const POST_MARKDOWN: &str = "\
Spørg bare Festhusets forpagter Anne Mortensen om jeres ønsker ang. fremtidige arrangementer, \
fester osv. - eller udfyld forespørgselsformularen her på websiten.

**Anne laver også den lækreste \"Take Away\" mad og har mange tilbud for alle Slots Bjergby \
borgere - og alle andre selvfølgelig!** Hold øje med [slotsbjergbyfesthus.dk](https://slotsbjergbyfesthus.dk).

Du kan også se de nyeste tilbud på Facebook med alle mulige retter fra stege til småkager \
og lade dig inspirere: [Slots Bjergby Festhus](https://www.facebook.com/Slots-Bjergby-Festhus)

Bestil hos Anne tlf. 2014 4080 - email: <kontakt@slotsbjergbyfesthus.dk>

*Bon appetit!*";

fn post_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 5, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

pub fn fixtures() -> Fixtures {
    let categories = vec![
        Category::new(TAKE_AWAY, "Take away", 0),
        Category::new(FORRET, "Forret", 10),
        Category::new(HOVEDRETTER, "Hovedretter", 20),
        Category::new(DESSERTER, "Desserter", 30),
    ];

    let products: Vec<Product> = MENU
        .iter()
        .enumerate()
        .map(|(idx, (slug, title, price, course, description))| Product {
            slug: (*slug).to_string(),
            title: (*title).to_string(),
            description: (*description).to_string(),
            price_in_dkk: *price,
            image_src: (*slug == "tunmousse")
                .then(|| "/static/images/forret-tunmousse.svg".to_string()),
            image_alt: (*slug == "tunmousse").then(|| "Tunmousse med dild".to_string()),
            sort_order: (idx as i32) * 10,
            categories: vec![TAKE_AWAY.to_string(), (*course).to_string()],
        })
        .collect();

    let posts = vec![Post {
        slug: "fra-festhuset-2022".to_string(),
        title: "Fra Festhuset 2022".to_string(),
        markdown: POST_MARKDOWN.to_string(),
        created_at: post_date(),
    }];

    let line = |slug: &str, quantity: i32| {
        products
            .iter()
            .find(|p| p.slug == slug)
            .map(|product| CartItem {
                product: product.clone(),
                quantity,
            })
    };
    let carts = vec![Cart {
        id: DEMO_CART_ID.to_string(),
        created_at: post_date(),
        items: [line("rejecocktail", 2), line("brownie", 1)]
            .into_iter()
            .flatten()
            .collect(),
    }];

    Fixtures {
        categories,
        products,
        posts,
        carts,
    }
}

/// Insert-or-update every fixture row in one transaction
pub async fn seed_postgres(pool: &PgPool, fixtures: &Fixtures) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    for category in &fixtures.categories {
        sqlx::query(
            r#"
            INSERT INTO categories (slug, title, sort_order)
            VALUES ($1, $2, $3)
            ON CONFLICT (slug)
            DO UPDATE SET title = EXCLUDED.title, sort_order = EXCLUDED.sort_order
            "#,
        )
        .bind(&category.slug)
        .bind(&category.title)
        .bind(category.sort_order)
        .execute(&mut *tx)
        .await?;
    }

    for product in &fixtures.products {
        sqlx::query(
            r#"
            INSERT INTO products (slug, title, description, price_in_dkk, image_src, image_alt, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (slug)
            DO UPDATE SET
                title = EXCLUDED.title, description = EXCLUDED.description,
                price_in_dkk = EXCLUDED.price_in_dkk, image_src = EXCLUDED.image_src,
                image_alt = EXCLUDED.image_alt, sort_order = EXCLUDED.sort_order
            "#,
        )
        .bind(&product.slug)
        .bind(&product.title)
        .bind(&product.description)
        .bind(product.price_in_dkk)
        .bind(&product.image_src)
        .bind(&product.image_alt)
        .bind(product.sort_order)
        .execute(&mut *tx)
        .await?;

        // Replace category links
        sqlx::query("DELETE FROM product_categories WHERE product_slug = $1")
            .bind(&product.slug)
            .execute(&mut *tx)
            .await?;

        if !product.categories.is_empty() {
            let product_slugs: Vec<&str> = product
                .categories
                .iter()
                .map(|_| product.slug.as_str())
                .collect();
            sqlx::query(
                r#"
                INSERT INTO product_categories (product_slug, category_slug)
                SELECT * FROM UNNEST($1::text[], $2::text[])
                "#,
            )
            .bind(&product_slugs)
            .bind(&product.categories)
            .execute(&mut *tx)
            .await?;
        }
    }

    for post in &fixtures.posts {
        sqlx::query(
            r#"
            INSERT INTO posts (slug, title, markdown, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (slug)
            DO UPDATE SET title = EXCLUDED.title, markdown = EXCLUDED.markdown
            "#,
        )
        .bind(&post.slug)
        .bind(&post.title)
        .bind(&post.markdown)
        .bind(post.created_at)
        .execute(&mut *tx)
        .await?;
    }

    for cart in &fixtures.carts {
        sqlx::query("INSERT INTO carts (id, created_at) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING")
            .bind(&cart.id)
            .bind(cart.created_at)
            .execute(&mut *tx)
            .await?;

        for item in &cart.items {
            sqlx::query(
                r#"
                INSERT INTO cart_items (cart_id, product_slug, quantity)
                VALUES ($1, $2, $3)
                ON CONFLICT (cart_id, product_slug) DO UPDATE SET quantity = EXCLUDED.quantity
                "#,
            )
            .bind(&cart.id)
            .bind(&item.product.slug)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;

    tracing::info!(
        categories = fixtures.categories.len(),
        products = fixtures.products.len(),
        posts = fixtures.posts.len(),
        "Seeded catalog"
    );
    Ok(())
}
