//! Offset pagination arithmetic shared by every listing.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Default page when the client sends nothing usable.
pub const DEFAULT_PAGE: u64 = 1;
/// Default page size when the client sends nothing usable.
pub const DEFAULT_PER_PAGE: u64 = 10;
/// Largest page size a client may request.
pub const MAX_PER_PAGE: u64 = 100;

/// Page window requested by a caller. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    /// Builds a request, forcing `page >= 1` and `per_page` into `[1, MAX_PER_PAGE]`.
    pub fn clamped(page: i64, per_page: i64) -> Self {
        Self {
            page: page.max(1) as u64,
            per_page: per_page.clamp(1, MAX_PER_PAGE as i64) as u64,
        }
    }

    /// SQL `LIMIT`.
    pub fn limit(&self) -> i64 {
        i64::try_from(self.per_page).unwrap_or(i64::MAX)
    }

    /// SQL `OFFSET`, saturating for absurd page numbers.
    pub fn offset(&self) -> i64 {
        let offset = (self.page.saturating_sub(1)).saturating_mul(self.per_page);
        i64::try_from(offset).unwrap_or(i64::MAX)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Pagination metadata returned alongside every page.
///
/// `last_page` is `ceil(total / per_page)` and is 0 for an empty result.
/// `prev`/`next` are `None` at the edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    #[schema(example = 25)]
    pub total: u64,
    #[schema(example = 3)]
    pub last_page: u64,
    #[schema(example = 3)]
    pub current_page: u64,
    #[schema(example = 10)]
    pub per_page: u64,
    #[schema(example = 2)]
    pub prev: Option<u64>,
    #[schema(example = json!(null))]
    pub next: Option<u64>,
}

impl PaginationMeta {
    /// Computes the metadata for `request` against `total` matching rows.
    pub fn compute(total: u64, request: PageRequest) -> Self {
        let per_page = request.per_page.max(1);
        let current_page = request.page;
        let last_page = total.div_ceil(per_page);

        Self {
            total,
            last_page,
            current_page,
            per_page,
            prev: (current_page > 1).then(|| current_page - 1),
            next: (current_page < last_page).then(|| current_page + 1),
        }
    }
}

/// One page of rows plus its metadata.
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            data,
            meta: PaginationMeta::compute(total, request),
        }
    }

    /// Maps rows while keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}
