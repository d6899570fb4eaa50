// src/application/ports/security.rs
use crate::application::{ApplicationResult, dto::AuthenticatedIdentity};
use async_trait::async_trait;

/// Turns a bearer credential into an identity. Implementations reject
/// malformed, forged or expired credentials with `Unauthorized`.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> ApplicationResult<AuthenticatedIdentity>;
}
