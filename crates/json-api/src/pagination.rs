//! List pagination for HTTP responses.

use bakelink_app::domain::pagination::{PageMeta, Pagination};
use salvo::oapi::{ToSchema, extract::QueryParam};
use serde::{Deserialize, Serialize};

/// Resolve `page`/`limit` query parameters.
pub(crate) fn pagination(page: QueryParam<u32, false>, limit: QueryParam<u32, false>) -> Pagination {
    Pagination::from_query(page.into_inner(), limit.into_inner())
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaginationResponse {
    /// Current page, starting at 1
    pub page: u32,

    /// Page size
    pub limit: u32,

    /// Number of matching rows
    pub total: u64,

    /// Number of pages at this page size
    pub total_pages: u64,
}

impl From<PageMeta> for PaginationResponse {
    fn from(meta: PageMeta) -> Self {
        Self {
            page: meta.page,
            limit: meta.limit,
            total: meta.total,
            total_pages: meta.total_pages,
        }
    }
}
