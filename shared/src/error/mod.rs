//! Unified error system for the Festhus storefront
//!
//! - [`ErrorCode`]: Standardized numeric error codes
//! - [`ErrorCategory`]: Classification of errors by code range
//! - [`AppError`]: Error type carrying a code, a message and optional details
//! - [`ApiResponse`]: JSON envelope for failed API calls
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 6xxx: Catalog errors (products, categories, posts, carts)
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{ApiResponse, AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::ProductNotFound).with_detail("slug", "brownie");
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(6001));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError};
