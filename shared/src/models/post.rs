//! Post Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// News post shown on the home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Post {
    pub slug: String,
    pub title: String,
    /// Body in Markdown
    pub markdown: String,
    pub created_at: DateTime<Utc>,
}
