//! Application state

use std::sync::Arc;

use crate::config::{CatalogBackend, Config, SiteInfo};
use crate::db::{self, CatalogRepository, MemoryCatalogRepository, PgCatalogRepository, seed};
use crate::locale::Locale;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
///
/// Read-only after startup. Nothing request-specific lives here.
#[derive(Clone)]
pub struct AppState {
    /// Catalog, posts and carts
    pub catalog: Arc<dyn CatalogRepository>,
    /// Fallback when `Accept-Language` names nothing supported
    pub default_locale: Locale,
    /// Footer identity
    pub site: Arc<SiteInfo>,
}

impl AppState {
    /// Create a new AppState, connecting to the configured backend
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let catalog: Arc<dyn CatalogRepository> = match config.catalog_backend {
            CatalogBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .ok_or("DATABASE_URL must be set")?;
                let pool = db::postgres::connect(url, config.max_db_connections).await?;

                if config.seed_on_start {
                    seed::seed_postgres(&pool, &seed::fixtures()).await?;
                }

                Arc::new(PgCatalogRepository::new(pool))
            }
            CatalogBackend::Memory => {
                tracing::info!("Using in-memory sample catalog");
                Arc::new(MemoryCatalogRepository::from_fixtures(seed::fixtures()))
            }
        };

        Ok(Self::with_repository(config, catalog))
    }

    /// Build state around an existing repository
    pub fn with_repository(config: &Config, catalog: Arc<dyn CatalogRepository>) -> Self {
        Self {
            catalog,
            default_locale: config.default_locale,
            site: Arc::new(config.site.clone()),
        }
    }
}
