/// Offset window handed to the repository for an ordered read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: u64,
    pub limit: u32,
}

impl PageWindow {
    /// `page` is 1-based and validated upstream; a zero page is treated as
    /// the first page so the skip can never underflow.
    pub fn for_page(page: u32, limit: u32) -> Self {
        let skip = u64::from(page.saturating_sub(1)) * u64::from(limit);
        Self { skip, limit }
    }
}

/// Page metadata reported alongside a page of results. `page` and `limit`
/// are the requested values, never clamped to `total_pages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageMeta {
    pub fn compute(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total.div_ceil(u64::from(limit))
        };
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: u64::from(page) < total_pages,
            has_prev: page > 1,
        }
    }

    /// Metadata for random sampling, which is a single unpaged view.
    pub fn unpaged(limit: u32, total: u64) -> Self {
        Self {
            page: 1,
            limit,
            total,
            total_pages: 1,
            has_next: false,
            has_prev: false,
        }
    }
}
