//! Shared types for the Festhus storefront
//!
//! Domain records read from the catalog store and the unified error
//! system used by the server's JSON API and HTML pages.

pub mod error;
pub mod models;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, ErrorCode};
