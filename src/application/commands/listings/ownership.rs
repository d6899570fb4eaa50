// src/application/commands/listings/ownership.rs
use super::ListingCommandService;
use crate::{
    application::{
        dto::AuthenticatedIdentity,
        error::{ApplicationError, ApplicationResult},
    },
    domain::listing::{Listing, ListingId, OwnershipDecision},
};
use tracing::warn;

impl ListingCommandService {
    /// Resolves the mutation target and checks it belongs to `actor`. Runs
    /// before the request body is looked at.
    pub(super) async fn authorize_owner(
        &self,
        actor: &AuthenticatedIdentity,
        raw_id: &str,
        action: &'static str,
    ) -> ApplicationResult<Listing> {
        let id = ListingId::parse(raw_id)?;
        let found = self.repo.find_by_id(id).await?;

        match OwnershipDecision::resolve(found, &actor.identity) {
            OwnershipDecision::Authorized(listing) => Ok(*listing),
            OwnershipDecision::NotFound => Err(ApplicationError::not_found("listing not found")),
            OwnershipDecision::Forbidden => {
                warn!(
                    listing_id = %id,
                    identity = %actor.identity,
                    action,
                    "mutation attempted by non-owner"
                );
                Err(ApplicationError::forbidden(format!(
                    "only the owner may {action} this listing"
                )))
            }
        }
    }
}
