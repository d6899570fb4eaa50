use crate::domain::listing::OwnerId;
use chrono::{DateTime, Utc};

/// Identity established from a verified bearer credential.
#[derive(Debug, Clone)]
pub struct AuthenticatedIdentity {
    pub identity: OwnerId,
    pub email: String,
    pub email_verified: bool,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AuthenticatedIdentity {
    /// Domain part of the email, lowercased.
    pub fn email_domain(&self) -> Option<String> {
        self.email
            .rsplit_once('@')
            .map(|(_, domain)| domain.to_ascii_lowercase())
            .filter(|domain| !domain.is_empty())
    }
}
