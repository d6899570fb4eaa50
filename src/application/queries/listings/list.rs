// src/application/queries/listings/list.rs
use super::ListingQueryService;
use crate::application::{
    dto::ListingPageDto,
    error::ApplicationResult,
    validation::{ListingQueryInput, QueryDefaults},
};

pub struct ListListingsQuery {
    pub params: ListingQueryInput,
}

impl ListingQueryService {
    /// Public browse: active listings unless the client asks otherwise.
    pub async fn list_listings(&self, query: ListListingsQuery) -> ApplicationResult<ListingPageDto> {
        let resolved = query.params.resolve(QueryDefaults::BROWSE)?;
        self.read_page(resolved).await
    }
}
