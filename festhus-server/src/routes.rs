//! Site paths

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::form_urlencoded;

/// Everything but RFC 3986 unreserved characters
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub const INDEX: &str = "/";
pub const MENU: &str = "/menu";
pub const ARRANGEMENTS: &str = "/arrangementer";
pub const NOT_FOUND: &str = "/404";
pub const STATIC: &str = "/static";

pub fn product(slug: &str) -> String {
    format!("/produkt/{}", utf8_percent_encode(slug, PATH_SEGMENT))
}

/// Menu filtered to one category
pub fn menu_category(slug: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(slug.as_bytes()).collect();
    format!("{MENU}?category[]={encoded}")
}
