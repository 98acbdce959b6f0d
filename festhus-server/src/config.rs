//! Storefront server configuration

use std::str::FromStr;

use crate::locale::Locale;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Where catalog data is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogBackend {
    Postgres,
    /// Built-in sample catalog, no database required
    Memory,
}

impl FromStr for CatalogBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown CATALOG_BACKEND: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Business identity shown in the footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
    /// CVR number, the footer omits the line when unset
    pub vat_id: Option<String>,
    pub address: String,
    pub facebook_url: String,
    pub smiley_url: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "Slots Bjergby Festhus".into(),
            phone: "2014 4080".into(),
            email: "kontakt@slotsbjergbyfesthus.dk".into(),
            vat_id: None,
            address: "Slots Bjergbyvej 42, 4200 Slagelse".into(),
            facebook_url: "https://www.facebook.com/Slots-Bjergby-Festhus-109065667096390".into(),
            smiley_url: "https://www.findsmiley.dk/908989".into(),
        }
    }
}

/// Storefront server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL (required for the postgres backend)
    pub database_url: Option<String>,
    pub catalog_backend: CatalogBackend,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    pub max_db_connections: u32,
    /// Used when `Accept-Language` names nothing supported
    pub default_locale: Locale,
    /// Directory served under `/static`
    pub static_dir: String,
    /// Upsert the sample catalog into PostgreSQL at startup
    pub seed_on_start: bool,
    pub log_format: LogFormat,
    /// Daily rolling log files are written here when set and present
    pub log_dir: Option<String>,
    pub site: SiteInfo,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BoxError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let catalog_backend = match var("CATALOG_BACKEND") {
            Some(v) => v.parse::<CatalogBackend>()?,
            None => CatalogBackend::Postgres,
        };

        let database_url = var("DATABASE_URL");
        if catalog_backend == CatalogBackend::Postgres && database_url.is_none() {
            return Err("DATABASE_URL must be set when CATALOG_BACKEND=postgres".into());
        }

        let default_locale = match var("DEFAULT_LOCALE") {
            Some(v) => v.parse::<Locale>()?,
            None => Locale::DaDk,
        };

        let defaults = SiteInfo::default();
        let log_format = var("LOG_FORMAT");

        let mut config = Self {
            database_url,
            catalog_backend,
            http_port: var("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            max_db_connections: var("MAX_DB_CONNECTIONS")
                .and_then(|n| n.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(5),
            default_locale,
            static_dir: var("STATIC_DIR").unwrap_or_else(|| "public".into()),
            seed_on_start: var("SEED_ON_START")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            log_format: match log_format.as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            log_dir: var("LOG_DIR"),
            site: SiteInfo {
                name: var("SITE_NAME").unwrap_or(defaults.name),
                phone: var("SITE_PHONE").unwrap_or(defaults.phone),
                email: var("SITE_EMAIL").unwrap_or(defaults.email),
                vat_id: var("SITE_VAT_ID").or(defaults.vat_id),
                address: var("SITE_ADDRESS").unwrap_or(defaults.address),
                facebook_url: defaults.facebook_url,
                smiley_url: defaults.smiley_url,
            },
        };

        // production logs are collected as JSON unless LOG_FORMAT says otherwise
        if log_format.is_none() && config.is_production() {
            config.log_format = LogFormat::Json;
        }

        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// In-memory configuration with defaults, for tests and demos
    pub fn memory() -> Self {
        Self {
            database_url: None,
            catalog_backend: CatalogBackend::Memory,
            http_port: 3000,
            environment: "development".into(),
            max_db_connections: 5,
            default_locale: Locale::DaDk,
            static_dir: "public".into(),
            seed_on_start: false,
            log_format: LogFormat::Pretty,
            log_dir: None,
            site: SiteInfo::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, BoxError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| env.get(name).cloned())
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let err = load(&[]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/festhus")]).unwrap();
        assert_eq!(config.catalog_backend, CatalogBackend::Postgres);
        assert_eq!(config.http_port, 3000);
        assert_eq!(config.max_db_connections, 5);
        assert_eq!(config.default_locale, Locale::DaDk);
        assert_eq!(config.static_dir, "public");
        assert!(!config.seed_on_start);
        assert!(!config.is_production());
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.site, SiteInfo::default());
    }

    #[test]
    fn test_memory_backend_and_overrides() {
        let config = load(&[
            ("CATALOG_BACKEND", "memory"),
            ("HTTP_PORT", "8080"),
            ("MAX_DB_CONNECTIONS", "abc"),
            ("DEFAULT_LOCALE", "en-GB"),
            ("SEED_ON_START", "true"),
            ("LOG_FORMAT", "json"),
            ("ENVIRONMENT", "production"),
            ("SITE_PHONE", "1234 5678"),
        ])
        .unwrap();

        assert_eq!(config.catalog_backend, CatalogBackend::Memory);
        assert!(config.database_url.is_none());
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.max_db_connections, 5);
        assert_eq!(config.default_locale, Locale::EnGb);
        assert!(config.seed_on_start);
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(config.is_production());
        assert_eq!(config.site.phone, "1234 5678");
    }

    #[test]
    fn test_production_defaults_to_json_logs() {
        let config = load(&[("CATALOG_BACKEND", "memory"), ("ENVIRONMENT", "production")]).unwrap();
        assert_eq!(config.log_format, LogFormat::Json);

        let config = load(&[
            ("CATALOG_BACKEND", "memory"),
            ("ENVIRONMENT", "production"),
            ("LOG_FORMAT", "pretty"),
        ])
        .unwrap();
        assert_eq!(config.log_format, LogFormat::Pretty);

        let config = load(&[("CATALOG_BACKEND", "memory"), ("ENVIRONMENT", "staging")]).unwrap();
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(load(&[("CATALOG_BACKEND", "redis")]).is_err());
        assert!(
            load(&[("CATALOG_BACKEND", "memory"), ("DEFAULT_LOCALE", "fr-FR")]).is_err()
        );
    }
}
