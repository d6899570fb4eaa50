// src/application/commands/listings/update.rs
use super::ListingCommandService;
use crate::application::{
    dto::{AuthenticatedIdentity, ListingDto},
    error::ApplicationResult,
    validation::UpdateListingInput,
};
use tracing::{debug, info};

/// The body travels unparsed: a non-owner must get `Forbidden` whatever it
/// contains, so it is only read once ownership is settled.
pub struct UpdateListingCommand {
    pub id: String,
    pub body: Vec<u8>,
}

impl UpdateListingCommand {
    pub fn new(id: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
        }
    }
}

impl ListingCommandService {
    pub async fn update_listing(
        &self,
        actor: &AuthenticatedIdentity,
        command: UpdateListingCommand,
    ) -> ApplicationResult<ListingDto> {
        let UpdateListingCommand { id, body } = command;
        let current = self.authorize_owner(actor, &id, "update").await?;

        let input = UpdateListingInput::from_json_slice(&body)?;
        let update = input.into_update(current.id, self.clock.now())?;
        if update.is_empty() {
            debug!(listing_id = %current.id, "empty update, nothing written");
            return Ok(current.into());
        }

        let updated = self.repo.update_by_id(update).await?;
        info!(listing_id = %updated.id, "listing updated");
        Ok(updated.into())
    }
}
