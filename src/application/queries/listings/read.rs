// src/application/queries/listings/read.rs
use super::ListingQueryService;
use crate::{
    application::{dto::ListingPageDto, error::ApplicationResult},
    domain::listing::{ListingQuery, PageMeta, PageWindow, ReadPlan, filter},
};
use tracing::debug;

impl ListingQueryService {
    /// Compiles a resolved query and runs exactly one repository read. Random
    /// sampling ignores the requested page and reports a single page.
    pub(super) async fn read_page(&self, query: ListingQuery) -> ApplicationResult<ListingPageDto> {
        let compiled = filter::compile(&query);

        let (records, meta) = match compiled.plan {
            ReadPlan::Random => {
                let (records, total) = self
                    .repo
                    .sample_many(&compiled.predicate, query.limit)
                    .await?;
                (records, PageMeta::unpaged(query.limit, total))
            }
            ReadPlan::Ordered(sort) => {
                let window = PageWindow::for_page(query.page, query.limit);
                let (records, total) = self
                    .repo
                    .find_many(&compiled.predicate, sort, window)
                    .await?;
                (records, PageMeta::compute(query.page, query.limit, total))
            }
        };

        debug!(
            returned = records.len(),
            total = meta.total,
            sort = %query.sort,
            "listing page read"
        );
        Ok(ListingPageDto::assemble(records, meta, &query))
    }
}
