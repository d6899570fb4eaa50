// src/application/queries/listings/own.rs
use super::ListingQueryService;
use crate::application::{
    dto::{AuthenticatedIdentity, ListingPageDto},
    error::ApplicationResult,
    validation::{ListingQueryInput, QueryDefaults},
};

pub struct ListOwnListingsQuery {
    pub params: ListingQueryInput,
}

impl ListingQueryService {
    /// Listings owned by `actor`, every status by default.
    pub async fn list_own_listings(
        &self,
        actor: &AuthenticatedIdentity,
        query: ListOwnListingsQuery,
    ) -> ApplicationResult<ListingPageDto> {
        let mut resolved = query.params.resolve(QueryDefaults::OWN)?;
        resolved.owner = Some(actor.identity.clone());
        self.read_page(resolved).await
    }
}
