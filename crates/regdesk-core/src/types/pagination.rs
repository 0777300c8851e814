//! Pagination types for list endpoints.
//!
//! Listings are limit/offset based. The limit is defaulted and clamped so a
//! caller can never request an unbounded scan; repeated calls with the same
//! filters and advancing offsets walk the result set without skips or
//! duplicates as long as the underlying ordering is on immutable keys.

use serde::{Deserialize, Serialize};

/// Default page size.
const DEFAULT_LIMIT: u64 = 25;
/// Maximum page size.
const MAX_LIMIT: u64 = 100;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    /// Maximum number of items to return.
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Number of items to skip before the first returned item.
    #[serde(default)]
    pub offset: u64,
}

impl PageRequest {
    /// Create a new page request with a clamped limit.
    pub fn new(limit: u64, offset: u64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
            offset,
        }
    }

    /// Return the SQL `LIMIT` value, clamped to the allowed range.
    pub fn limit(&self) -> u64 {
        self.limit.clamp(1, MAX_LIMIT)
    }

    /// Return the SQL `OFFSET` value, clamped to what the driver can bind
    /// as a signed 64-bit integer.
    pub fn offset(&self) -> u64 {
        self.offset.min(i64::MAX as u64)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T: Serialize> {
    /// The items on this page.
    pub items: Vec<T>,
    /// The limit this page was fetched with.
    pub limit: u64,
    /// The offset this page was fetched at.
    pub offset: u64,
    /// Total number of matching items across all pages.
    pub total: u64,
    /// Total number of pages at this limit.
    pub total_pages: u64,
}

impl<T: Serialize> PageResponse<T> {
    /// Create a new paginated response.
    pub fn new(items: Vec<T>, page: &PageRequest, total: u64) -> Self {
        let limit = page.limit();
        let total_pages = total.div_ceil(limit);
        Self {
            items,
            limit,
            offset: page.offset(),
            total,
            total_pages,
        }
    }
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}
