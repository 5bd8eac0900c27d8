//! Page-based pagination for list endpoints.
//!
//! Uses `limit` and `page` query parameters:
//! - `limit`: items per page (1-100, default: 10)
//! - `page`: page number (1-indexed, default: 1)
//!
//! The store query skips `(page - 1) * limit` rows and takes `limit`.
//!
//! # Example
//!
//! ```ignore
//! // GET /api/books?limit=20&page=3
//! let params = PaginationParams { limit: Some(20), page: Some(3) };
//!
//! assert_eq!(params.limit(), 20);
//! assert_eq!(params.offset(), 40);
//! ```

use serde::Deserialize;
use utoipa::ToSchema;

use crate::serde::deserialize_optional_i64;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Default, Hash, PartialEq, Eq, Deserialize, ToSchema)]
pub struct PaginationParams {
    /// Maximum number of items to return (1-100, default: 10)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
}

impl PaginationParams {
    /// Returns the effective limit, clamped to [1, 100].
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Returns the page number, clamped to a minimum of 1.
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Number of rows to skip.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }
}
