use crate::domain::listing::PageMeta;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationDto {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl From<PageMeta> for PaginationDto {
    fn from(meta: PageMeta) -> Self {
        Self {
            page: meta.page,
            limit: meta.limit,
            total: meta.total,
            total_pages: meta.total_pages,
            has_next: meta.has_next,
            has_prev: meta.has_prev,
        }
    }
}
