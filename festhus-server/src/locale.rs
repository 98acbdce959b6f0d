//! Locale negotiation and locale-aware formatting
//!
//! The locale is always passed in explicitly. Handlers negotiate a
//! [`LocalePreference`] from `Accept-Language` once per request and thread
//! its primary [`Locale`] into every projection that formats prices or dates.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use axum::extract::FromRequestParts;
use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::request::Parts;
use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use icu_decimal::input::Decimal;
use icu_decimal::options::DecimalFormatterOptions;
use icu_decimal::{DecimalFormatter, DecimalFormatterPreferences};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Supported display locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "da-DK")]
    DaDk,
    #[serde(rename = "en-GB")]
    EnGb,
    #[serde(rename = "en-US")]
    EnUs,
}

impl Locale {
    /// BCP 47 tag
    pub fn tag(&self) -> &'static str {
        match self {
            Self::DaDk => "da-DK",
            Self::EnGb => "en-GB",
            Self::EnUs => "en-US",
        }
    }

    /// Value for the `<html lang>` attribute
    pub fn lang(&self) -> &'static str {
        match self {
            Self::DaDk => "da",
            Self::EnGb | Self::EnUs => "en",
        }
    }

    /// Map a language tag onto a supported locale.
    ///
    /// `da` in any region is Danish. `en-US` and bare `en` are US English,
    /// every other English region formats like `en-GB`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_ascii_lowercase();
        let mut parts = tag.split(['-', '_']);
        let language = parts.next()?;
        let region = parts.next();

        match (language, region) {
            ("da", _) => Some(Self::DaDk),
            ("en", None | Some("us")) => Some(Self::EnUs),
            ("en", Some(_)) => Some(Self::EnGb),
            _ => None,
        }
    }

    pub fn translations(&self) -> &'static Translations {
        match self {
            Self::DaDk => &DANISH,
            Self::EnGb | Self::EnUs => &ENGLISH,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| format!("unsupported locale: {s}"))
    }
}

/// Ordered, de-duplicated list of locales the client accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalePreference {
    locales: Vec<Locale>,
}

impl LocalePreference {
    /// Parse an `Accept-Language` header value.
    ///
    /// Entries are ordered by q-weight (header order breaks ties). Wildcards,
    /// `q=0`, malformed weights and unsupported languages are dropped. When
    /// nothing usable remains the result holds only `default`.
    pub fn from_accept_language(header: Option<&str>, default: Locale) -> Self {
        let mut weighted: Vec<(Locale, f32)> = Vec::new();

        for entry in header.unwrap_or_default().split(',') {
            let mut pieces = entry.split(';');
            let tag = pieces.next().unwrap_or_default().trim();
            if tag.is_empty() || tag == "*" {
                continue;
            }

            let mut weight = 1.0_f32;
            for param in pieces {
                if let Some(value) = param.trim().strip_prefix("q=") {
                    weight = match value.trim().parse::<f32>() {
                        Ok(q) if (0.0..=1.0).contains(&q) => q,
                        _ => 0.0,
                    };
                }
            }
            if weight <= 0.0 {
                continue;
            }

            if let Some(locale) = Locale::from_tag(tag) {
                weighted.push((locale, weight));
            }
        }

        // stable: equal weights keep header order
        weighted.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut locales: Vec<Locale> = Vec::with_capacity(weighted.len());
        for (locale, _) in weighted {
            if !locales.contains(&locale) {
                locales.push(locale);
            }
        }
        if locales.is_empty() {
            locales.push(default);
        }

        Self { locales }
    }

    /// Most preferred supported locale
    pub fn primary(&self) -> Locale {
        self.locales[0]
    }
}

impl FromRequestParts<AppState> for LocalePreference {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok());
        Ok(Self::from_accept_language(header, state.default_locale))
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Format a whole-kroner amount as a DKK currency string.
///
/// Digits and separators come from the locale's CLDR decimal data, so
/// `da-DK` renders `1.250,00 kr.` and English locales render `DKK 1,250.00`.
pub fn format_currency(amount_dkk: i64, locale: Locale) -> String {
    let sign = if amount_dkk < 0 { "-" } else { "" };
    let number = format_kroner(amount_dkk.unsigned_abs(), locale);

    match locale {
        Locale::DaDk => format!("{sign}{number} kr."),
        Locale::EnGb | Locale::EnUs => format!("{sign}DKK {number}"),
    }
}

/// Whole kroner with two fraction digits, grouped for `locale`
fn format_kroner(units: u64, locale: Locale) -> String {
    let amount = match format!("{units}.00").parse::<Decimal>() {
        Ok(amount) => amount,
        Err(e) => {
            tracing::error!(units, error = ?e, "Amount is not a valid decimal");
            return units.to_string();
        }
    };

    match decimal_formatter(locale) {
        Some(formatter) => formatter.format(&amount).to_string(),
        None => amount.to_string(),
    }
}

fn decimal_formatter(locale: Locale) -> Option<&'static DecimalFormatter> {
    static DA_DK: OnceLock<Option<DecimalFormatter>> = OnceLock::new();
    static EN_GB: OnceLock<Option<DecimalFormatter>> = OnceLock::new();
    static EN_US: OnceLock<Option<DecimalFormatter>> = OnceLock::new();

    let cell = match locale {
        Locale::DaDk => &DA_DK,
        Locale::EnGb => &EN_GB,
        Locale::EnUs => &EN_US,
    };
    cell.get_or_init(|| build_decimal_formatter(locale)).as_ref()
}

fn build_decimal_formatter(locale: Locale) -> Option<DecimalFormatter> {
    let tag = match locale.tag().parse::<icu_locale_core::Locale>() {
        Ok(tag) => tag,
        Err(e) => {
            tracing::error!(locale = %locale, error = ?e, "Invalid locale tag");
            return None;
        }
    };

    let prefs = DecimalFormatterPreferences::from(&tag);
    match DecimalFormatter::try_new(prefs, DecimalFormatterOptions::default()) {
        Ok(formatter) => Some(formatter),
        Err(e) => {
            tracing::error!(locale = %locale, error = %e, "No decimal data for locale");
            None
        }
    }
}

/// A timestamp ready for a `<time datetime=..>display</time>` element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedDate {
    /// RFC 3339 in UTC with millisecond precision
    pub iso: String,
    /// Day, abbreviated month and year in the locale's order
    pub display: String,
}

const MONTHS_DA: [&str; 12] = [
    "jan.", "feb.", "mar.", "apr.", "maj", "jun.", "jul.", "aug.", "sep.", "okt.", "nov.", "dec.",
];

const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn format_date(instant: DateTime<Utc>, locale: Locale) -> FormattedDate {
    let day = instant.day();
    let month = instant.month0() as usize;
    let year = instant.year();

    let display = match locale {
        Locale::DaDk => format!("{day}. {} {year}", MONTHS_DA[month]),
        Locale::EnGb => format!("{day} {} {year}", MONTHS_EN[month]),
        Locale::EnUs => format!("{} {day}, {year}", MONTHS_EN[month]),
    };

    FormattedDate {
        iso: instant.to_rfc3339_opts(SecondsFormat::Millis, true),
        display,
    }
}

// =============================================================================
// UI strings
// =============================================================================

/// Fixed interface strings per language
#[derive(Debug)]
pub struct Translations {
    pub home: &'static str,
    pub menu: &'static str,
    pub arrangements: &'static str,
    pub filters: &'static str,
    pub category_filter: &'static str,
    pub apply_filters: &'static str,
    pub clear_filters: &'static str,
    pub products_heading: &'static str,
    pub no_products: &'static str,
    pub categories_heading: &'static str,
    pub back_to_menu: &'static str,
    pub posts_heading: &'static str,
    pub cart: &'static str,
    pub not_found_title: &'static str,
    pub not_found_body: &'static str,
    pub back_home: &'static str,
    pub error_title: &'static str,
    pub error_body: &'static str,
    pub contact_heading: &'static str,
    pub company_heading: &'static str,
    pub vat_label: &'static str,
    pub arrangements_body: &'static str,
}

static DANISH: Translations = Translations {
    home: "Forside",
    menu: "Menukort",
    arrangements: "Arrangementer",
    filters: "Filtre",
    category_filter: "Produkt kategori",
    apply_filters: "Anvend",
    clear_filters: "Nulstil",
    products_heading: "Produkter",
    no_products: "Ingen retter matcher de valgte kategorier.",
    categories_heading: "Kategorier",
    back_to_menu: "Tilbage til menukortet",
    posts_heading: "Nyt fra Festhuset",
    cart: "Indkøbskurv",
    not_found_title: "Siden blev ikke fundet",
    not_found_body: "Vi kunne desværre ikke finde den side, du leder efter.",
    back_home: "Tilbage til forsiden",
    error_title: "Der opstod en fejl",
    error_body: "Prøv venligst igen om lidt.",
    contact_heading: "Kontakt",
    company_heading: "Firma",
    vat_label: "CVR nr.",
    arrangements_body: "Hold dit arrangement hos os. Ring eller skriv, så finder vi en dato.",
};

static ENGLISH: Translations = Translations {
    home: "Home",
    menu: "Menu",
    arrangements: "Events",
    filters: "Filters",
    category_filter: "Category",
    apply_filters: "Apply",
    clear_filters: "Clear",
    products_heading: "Products",
    no_products: "No dishes match the selected categories.",
    categories_heading: "Categories",
    back_to_menu: "Back to the menu",
    posts_heading: "News from the venue",
    cart: "Cart",
    not_found_title: "Page not found",
    not_found_body: "Sorry, we could not find the page you are looking for.",
    back_home: "Back to the front page",
    error_title: "Something went wrong",
    error_body: "Please try again in a moment.",
    contact_heading: "Contact",
    company_heading: "Company",
    vat_label: "VAT no.",
    arrangements_body: "Host your event with us. Call or write and we will find a date.",
};
