// src/application/commands/listings/create.rs
use super::ListingCommandService;
use crate::application::{
    dto::{AuthenticatedIdentity, ListingDto},
    error::ApplicationResult,
    validation::CreateListingInput,
};
use tracing::info;

pub struct CreateListingCommand {
    pub input: CreateListingInput,
}

impl ListingCommandService {
    /// The owner is always the authenticated identity; any owner field in the
    /// payload has already been dropped during deserialization.
    pub async fn create_listing(
        &self,
        actor: &AuthenticatedIdentity,
        command: CreateListingCommand,
    ) -> ApplicationResult<ListingDto> {
        let new_listing = command
            .input
            .into_new_listing(actor.identity.clone(), self.clock.now())?;

        let created = self.repo.create(new_listing).await?;
        info!(listing_id = %created.id, owner = %created.owner_id, "listing created");
        Ok(created.into())
    }
}
