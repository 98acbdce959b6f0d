//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            Self::NotFound | Self::ProductNotFound | Self::CartNotFound => StatusCode::NOT_FOUND,

            Self::InternalError | Self::TemplateError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
