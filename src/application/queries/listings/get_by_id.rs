// src/application/queries/listings/get_by_id.rs
use super::ListingQueryService;
use crate::{
    application::{
        dto::ListingDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::listing::ListingId,
};

pub struct GetListingQuery {
    pub id: String,
}

impl ListingQueryService {
    pub async fn get_listing(&self, query: GetListingQuery) -> ApplicationResult<ListingDto> {
        let id = ListingId::parse(&query.id)?;
        self.repo
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found("listing not found"))
    }
}
