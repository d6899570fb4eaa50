// src/application/commands/listings/delete.rs
use super::ListingCommandService;
use crate::application::{dto::AuthenticatedIdentity, error::ApplicationResult};
use tracing::info;

pub struct DeleteListingCommand {
    pub id: String,
}

impl ListingCommandService {
    pub async fn delete_listing(
        &self,
        actor: &AuthenticatedIdentity,
        command: DeleteListingCommand,
    ) -> ApplicationResult<()> {
        let listing = self.authorize_owner(actor, &command.id, "delete").await?;
        self.repo.delete_by_id(listing.id).await?;
        info!(listing_id = %listing.id, "listing deleted");
        Ok(())
    }
}
