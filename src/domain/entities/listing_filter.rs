//! Filtering, sorting and pagination descriptors for listing queries.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Default page number when none is supplied.
pub const DEFAULT_PAGE: i64 = 1;
/// Default page size when none is supplied.
pub const DEFAULT_LIMIT: i64 = 20;
/// Largest accepted page size.
pub const MAX_LIMIT: i64 = 100;

/// Column a listing query is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    CreatedAt,
    Price,
}

impl SortBy {
    /// Fully qualified column rendered into `ORDER BY`.
    pub fn column(self) -> &'static str {
        match self {
            SortBy::CreatedAt => "l.created_at",
            SortBy::Price => "l.price",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    #[default]
    Desc,
}

impl SortDir {
    pub fn keyword(self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

/// Raw filter as supplied by the caller. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort_by: Option<SortBy>,
    pub sort_dir: Option<SortDir>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Resolved query with defaults applied, ready for the store.
///
/// `owner_id` restricts results to a single owner.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    pub owner_id: Option<i64>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort_by: SortBy,
    pub sort_dir: SortDir,
    pub page: i64,
    pub limit: i64,
}

impl ListingQuery {
    /// Number of rows to skip, or `None` if it does not fit in `i64`.
    pub fn checked_offset(&self) -> Option<i64> {
        self.page.checked_sub(1)?.checked_mul(self.limit)
    }

    /// Number of rows to skip, saturating at `i64::MAX`.
    ///
    /// Resolved queries have already been checked with [`Self::checked_offset`].
    pub fn offset(&self) -> i64 {
        self.checked_offset().unwrap_or(i64::MAX)
    }
}

/// One page of results plus page metadata.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    /// Builds a page, deriving `total_pages = ceil(total / limit)`.
    pub fn new(items: Vec<T>, total: i64, page: i64, limit: i64) -> Self {
        let total_pages = if limit > 0 { (total + limit - 1) / limit } else { 0 };
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }
}
