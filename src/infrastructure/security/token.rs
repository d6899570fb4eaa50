// src/infrastructure/security/token.rs
use crate::application::{
    dto::AuthenticatedIdentity,
    error::{ApplicationError, ApplicationResult},
    ports::security::IdentityVerifier,
};
use crate::infrastructure::security::claims::parse_claims;
use async_trait::async_trait;
use biscuit_auth::{
    Biscuit, KeyPair, PrivateKey, PublicKey,
    builder::{Algorithm, AuthorizerBuilder, Term},
};
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, SystemTime},
};

/// Verifies Ed25519-signed biscuit tokens minted by the campus identity
/// service. Only the public key is held here.
#[derive(Clone)]
pub struct BiscuitIdentityVerifier {
    public: PublicKey,
}

impl BiscuitIdentityVerifier {
    pub fn new(public: PublicKey) -> Self {
        Self { public }
    }

    pub fn from_public_key_hex(public_key_hex: &str) -> ApplicationResult<Self> {
        let public = PublicKey::from_bytes_hex(public_key_hex, Algorithm::Ed25519)
            .map_err(|err| ApplicationError::store(format!("invalid identity public key: {err}")))?;
        Ok(Self { public })
    }
}

#[async_trait]
impl IdentityVerifier for BiscuitIdentityVerifier {
    async fn verify(&self, token: &str) -> ApplicationResult<AuthenticatedIdentity> {
        let biscuit = Biscuit::from_base64(token.trim(), self.public)
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        // identity facts are only trusted from the authority block; appended
        // blocks could otherwise assert someone else's identity
        if biscuit.block_count() != 1 {
            return Err(ApplicationError::unauthorized(
                "attenuated identity tokens are not accepted",
            ));
        }

        // token checks (validity window) run against the current time
        let mut authorizer = AuthorizerBuilder::new()
            .time()
            .code("allow if true")
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?
            .build(&biscuit)
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        authorizer
            .authorize()
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        let (facts, _, _, _) = authorizer.dump();
        parse_claims(facts)
    }
}

/// Claims carried by an identity token.
#[derive(Debug, Clone)]
pub struct IdentityClaims {
    pub uid: String,
    pub email: String,
    pub email_verified: bool,
}

/// Mints identity tokens. The identity service owns this role in
/// production; the crate uses it for local development and tests.
#[derive(Clone)]
pub struct BiscuitIdentityIssuer {
    root: Arc<KeyPair>,
    ttl: Duration,
}

impl BiscuitIdentityIssuer {
    pub fn new(private_key_hex: &str, ttl: Duration) -> ApplicationResult<Self> {
        let private = PrivateKey::from_bytes_hex(private_key_hex, Algorithm::Ed25519)
            .map_err(|err| ApplicationError::store(err.to_string()))?;
        Ok(Self {
            root: Arc::new(KeyPair::from(&private)),
            ttl,
        })
    }

    pub fn generate(ttl: Duration) -> Self {
        Self {
            root: Arc::new(KeyPair::new()),
            ttl,
        }
    }

    pub fn public_key(&self) -> PublicKey {
        self.root.public()
    }

    pub fn verifier(&self) -> BiscuitIdentityVerifier {
        BiscuitIdentityVerifier::new(self.public_key())
    }

    pub fn issue(&self, claims: &IdentityClaims) -> ApplicationResult<String> {
        let issued_at = SystemTime::now();
        let expires_at = issued_at
            .checked_add(self.ttl)
            .ok_or_else(|| ApplicationError::store("token expiration overflow"))?;
        self.issue_window(claims, issued_at, expires_at)
    }

    /// Mints a token with an explicit validity window.
    pub fn issue_window(
        &self,
        claims: &IdentityClaims,
        issued_at: SystemTime,
        expires_at: SystemTime,
    ) -> ApplicationResult<String> {
        let (code, params) = build_code_and_params(claims, issued_at, expires_at);

        let token = Biscuit::builder()
            .code_with_params(&code, params, HashMap::new())
            .map_err(|err| ApplicationError::store(err.to_string()))?
            .build(self.root.as_ref())
            .map_err(|err| ApplicationError::store(err.to_string()))?;

        token
            .to_base64()
            .map_err(|err| ApplicationError::store(err.to_string()))
    }
}

fn build_code_and_params(
    claims: &IdentityClaims,
    issued_at: SystemTime,
    expires_at: SystemTime,
) -> (String, HashMap<String, Term>) {
    let mut params: HashMap<String, Term> = HashMap::new();
    params.insert("uid".to_string(), claims.uid.clone().into());
    params.insert("email".to_string(), claims.email.clone().into());
    params.insert("verified".to_string(), claims.email_verified.into());
    params.insert("issued".to_string(), issued_at.into());
    params.insert("exp".to_string(), expires_at.into());

    let code = String::from(
        r#"
        identity({uid}, {email});
        email_verified({verified});
        issued_at({issued});
        expires_at({exp});
        check if time($now), $now >= {issued};
        check if time($now), $now <= {exp};
        "#,
    );

    (code, params)
}
