use crate::domain::listing::{entity::Listing, value_objects::OwnerId};

pub struct IsListingOwnerSpec<'a> {
    listing: &'a Listing,
    requester: &'a OwnerId,
}

impl<'a> IsListingOwnerSpec<'a> {
    pub fn new(listing: &'a Listing, requester: &'a OwnerId) -> Self {
        Self { listing, requester }
    }

    pub fn is_satisfied(&self) -> bool {
        self.listing.is_owned_by(self.requester)
    }
}

/// Outcome of resolving a mutation target for an authenticated requester.
#[derive(Debug)]
pub enum OwnershipDecision {
    Authorized(Box<Listing>),
    Forbidden,
    NotFound,
}

impl OwnershipDecision {
    /// Existence is checked first, ownership second. Nothing from the
    /// request body takes part in the decision.
    pub fn resolve(found: Option<Listing>, requester: &OwnerId) -> Self {
        match found {
            None => OwnershipDecision::NotFound,
            Some(listing) => {
                if IsListingOwnerSpec::new(&listing, requester).is_satisfied() {
                    OwnershipDecision::Authorized(Box::new(listing))
                } else {
                    OwnershipDecision::Forbidden
                }
            }
        }
    }
}
