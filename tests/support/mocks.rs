// tests/support/mocks.rs
use async_trait::async_trait;
use campus_market::application::{
    dto::AuthenticatedIdentity,
    error::{ApplicationError, ApplicationResult},
    ports::{security::IdentityVerifier, time::Clock},
};
use campus_market::domain::listing::OwnerId;
use chrono::{DateTime, Duration, TimeZone, Utc};
use once_cell::sync::Lazy;
use std::sync::Mutex;

pub const OWNER_TOKEN: &str = "owner-token";
pub const OTHER_TOKEN: &str = "other-token";
pub const UNVERIFIED_TOKEN: &str = "unverified-token";
pub const OUTSIDER_TOKEN: &str = "outsider-token";

pub const OWNER_ID: &str = "user-a";
pub const OTHER_ID: &str = "user-b";

pub static FIXED_NOW: Lazy<DateTime<Utc>> =
    Lazy::new(|| Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap());

pub fn identity(uid: &str, email: &str, email_verified: bool) -> AuthenticatedIdentity {
    AuthenticatedIdentity {
        identity: OwnerId::new(uid).unwrap(),
        email: email.to_string(),
        email_verified,
        issued_at: *FIXED_NOW - Duration::minutes(5),
        expires_at: *FIXED_NOW + Duration::hours(1),
    }
}

pub fn owner() -> AuthenticatedIdentity {
    identity(OWNER_ID, "a@campus.edu", true)
}

pub fn other() -> AuthenticatedIdentity {
    identity(OTHER_ID, "b@campus.edu", true)
}

/// Maps a handful of fixed bearer strings to identities.
pub struct StaticIdentityVerifier;

#[async_trait]
impl IdentityVerifier for StaticIdentityVerifier {
    async fn verify(&self, token: &str) -> ApplicationResult<AuthenticatedIdentity> {
        match token {
            OWNER_TOKEN => Ok(owner()),
            OTHER_TOKEN => Ok(other()),
            UNVERIFIED_TOKEN => Ok(identity("user-c", "c@campus.edu", false)),
            OUTSIDER_TOKEN => Ok(identity("user-d", "d@elsewhere.org", true)),
            _ => Err(ApplicationError::unauthorized("invalid token")),
        }
    }
}

/// Clock that only moves when told to, so timestamps stay predictable.
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(*FIXED_NOW),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
