//! List pagination.

/// Page used when only `limit` is supplied.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when only `page` is supplied.
pub const DEFAULT_LIMIT: u32 = 10;

/// Largest page size a caller may request.
pub const MAX_LIMIT: u32 = 100;

/// How much of a list to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pagination {
    /// Every matching row.
    #[default]
    All,

    /// A single page of `limit` rows.
    Page { page: u32, limit: u32 },
}

impl Pagination {
    /// Resolve raw `page`/`limit` query values.
    ///
    /// With neither present the whole list is returned. Zero values fall back to
    /// the defaults and `limit` is capped at [`MAX_LIMIT`].
    #[must_use]
    pub fn from_query(page: Option<u32>, limit: Option<u32>) -> Self {
        if page.is_none() && limit.is_none() {
            return Self::All;
        }

        let page = page.filter(|page| *page > 0).unwrap_or(DEFAULT_PAGE);

        let limit = limit
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT);

        Self::Page { page, limit }
    }

    /// `LIMIT`/`OFFSET` pair to bind, or `None` for every row.
    #[must_use]
    pub fn limit_offset(self) -> (Option<i64>, i64) {
        match self {
            Self::All => (None, 0),
            Self::Page { page, limit } => (
                Some(i64::from(limit)),
                i64::from(page.saturating_sub(1)) * i64::from(limit),
            ),
        }
    }

    /// Build response metadata for a list with `total` matching rows.
    #[must_use]
    pub fn meta(self, total: u64) -> PageMeta {
        let (page, limit) = match self {
            Self::All => (
                DEFAULT_PAGE,
                u32::try_from(total).unwrap_or(u32::MAX).max(1),
            ),
            Self::Page { page, limit } => (page, limit),
        };

        PageMeta {
            page,
            limit,
            total,
            total_pages: total.div_ceil(u64::from(limit)),
        }
    }
}

/// Pagination metadata returned alongside list results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

/// One page of results.
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}
