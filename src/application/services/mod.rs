// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        ApplicationResult,
        commands::listings::ListingCommandService,
        dto::AuthenticatedIdentity,
        error::ApplicationError,
        ports::{security::IdentityVerifier, time::Clock},
        queries::listings::ListingQueryService,
    },
    domain::listing::ListingRepository,
};

/// Rules applied to an identity after its credential has been verified.
#[derive(Debug, Clone, Default)]
pub struct IdentityPolicy {
    pub require_verified_email: bool,
    /// Lowercased email domains admitted to the community. Empty admits
    /// every domain.
    pub allowed_email_domains: Vec<String>,
}

impl IdentityPolicy {
    pub fn check(&self, identity: &AuthenticatedIdentity) -> ApplicationResult<()> {
        if self.require_verified_email && !identity.email_verified {
            return Err(ApplicationError::unauthorized("email address not verified"));
        }
        if !self.allowed_email_domains.is_empty() {
            let admitted = identity
                .email_domain()
                .is_some_and(|domain| self.allowed_email_domains.contains(&domain));
            if !admitted {
                return Err(ApplicationError::unauthorized(
                    "email domain is not part of this community",
                ));
            }
        }
        Ok(())
    }
}

pub struct ApplicationServices {
    pub listing_commands: Arc<ListingCommandService>,
    pub listing_queries: Arc<ListingQueryService>,
    identity_verifier: Arc<dyn IdentityVerifier>,
    identity_policy: IdentityPolicy,
}

impl ApplicationServices {
    pub fn new(
        listing_repo: Arc<dyn ListingRepository>,
        identity_verifier: Arc<dyn IdentityVerifier>,
        clock: Arc<dyn Clock>,
        identity_policy: IdentityPolicy,
    ) -> Self {
        let listing_commands = Arc::new(ListingCommandService::new(
            Arc::clone(&listing_repo),
            Arc::clone(&clock),
        ));
        let listing_queries = Arc::new(ListingQueryService::new(Arc::clone(&listing_repo)));

        Self {
            listing_commands,
            listing_queries,
            identity_verifier,
            identity_policy,
        }
    }

    /// Verify a raw bearer token and apply the community identity policy.
    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedIdentity> {
        let identity = self.identity_verifier.verify(token).await?;
        self.identity_policy.check(&identity)?;
        Ok(identity)
    }
}
