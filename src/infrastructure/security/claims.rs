// src/infrastructure/security/claims.rs
use crate::application::{
    dto::AuthenticatedIdentity,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::listing::OwnerId;
use biscuit_auth::builder::{Fact, Predicate, Term};
use chrono::{DateTime, Utc};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub fn parse_claims(facts: Vec<Fact>) -> ApplicationResult<AuthenticatedIdentity> {
    let ctx = ClaimsContext::from_facts(facts);
    build_identity(ctx)
}

fn build_identity(ctx: ClaimsContext) -> ApplicationResult<AuthenticatedIdentity> {
    let uid = ctx
        .uid
        .ok_or_else(|| ApplicationError::unauthorized("missing identity"))?;
    let email = ctx
        .email
        .ok_or_else(|| ApplicationError::unauthorized("missing email"))?;
    let issued_at = ctx
        .issued_at
        .ok_or_else(|| ApplicationError::unauthorized("missing issued_at"))?;
    let expires_at = ctx
        .expires_at
        .ok_or_else(|| ApplicationError::unauthorized("missing expires_at"))?;

    let identity =
        OwnerId::new(uid).map_err(|_| ApplicationError::unauthorized("empty identity"))?;

    Ok(AuthenticatedIdentity {
        identity,
        email,
        email_verified: ctx.email_verified,
        issued_at: DateTime::<Utc>::from(issued_at),
        expires_at: DateTime::<Utc>::from(expires_at),
    })
}

#[derive(Default)]
struct ClaimsContext {
    uid: Option<String>,
    email: Option<String>,
    email_verified: bool,
    issued_at: Option<SystemTime>,
    expires_at: Option<SystemTime>,
}

impl ClaimsContext {
    fn from_facts(facts: Vec<Fact>) -> Self {
        let mut ctx = ClaimsContext::default();
        for fact in facts {
            ctx.apply_predicate(fact.predicate);
        }
        ctx
    }

    fn apply_predicate(&mut self, predicate: Predicate) {
        match predicate.name.as_str() {
            "identity" => self.handle_identity(predicate.terms),
            "email_verified" => {
                if let Some(Term::Bool(verified)) = predicate.terms.first() {
                    self.email_verified = *verified;
                }
            }
            "issued_at" => self.issued_at = first_date(&predicate.terms),
            "expires_at" => self.expires_at = first_date(&predicate.terms),
            _ => {}
        }
    }

    fn handle_identity(&mut self, terms: Vec<Term>) {
        let mut terms = terms.into_iter();
        if let (Some(Term::Str(uid)), Some(Term::Str(email))) = (terms.next(), terms.next()) {
            self.uid = Some(uid);
            self.email = Some(email);
        }
    }
}

fn first_date(terms: &[Term]) -> Option<SystemTime> {
    match terms.first() {
        Some(Term::Date(seconds)) => Some(UNIX_EPOCH + Duration::from_secs(*seconds)),
        _ => None,
    }
}
