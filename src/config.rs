// src/config.rs
use crate::application::services::IdentityPolicy;
use crate::presentation::http::{middleware::rate_limit::RateLimitSettings, routes::RouterOptions};
use std::{env, str::FromStr};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(ConfigError::Invalid(format!(
                "STORAGE_BACKEND must be postgres or memory, got {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    storage_backend: StorageBackend,
    database_url: Option<String>,
    database_max_connections: u32,
    listen_addr: String,
    identity_public_key: String,
    allowed_origins: Vec<String>,
    require_verified_email: bool,
    allowed_email_domains: Vec<String>,
    rate_limit: Option<RateLimitSettings>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".into()
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid(format!(
            "{key} must be a boolean, got {other}"
        ))),
    }
}

fn parse_number<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::Invalid(format!("{key} must be a number, got {value}")))
}

impl AppConfig {
    /// Build configuration from environment variables, loading a `.env` file
    /// first when one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_backend = match lookup("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::Postgres,
        };

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => parse_number::<u32>("DATABASE_MAX_CONNECTIONS", &value)?,
            None => 16,
        };
        if database_max_connections == 0 {
            return Err(ConfigError::Invalid(
                "DATABASE_MAX_CONNECTIONS must be at least 1".into(),
            ));
        }

        let listen_addr = lookup("LISTEN_ADDR").unwrap_or_else(default_listen_addr);

        let identity_public_key = lookup("IDENTITY_PUBLIC_KEY")
            .map(|key| key.trim().to_string())
            .ok_or(ConfigError::Missing("IDENTITY_PUBLIC_KEY"))?;
        if identity_public_key.len() != 64
            || !identity_public_key.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(ConfigError::Invalid(
                "IDENTITY_PUBLIC_KEY must be a 32-byte hex string".into(),
            ));
        }

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|value| split_list(&value))
            .unwrap_or_default();

        let require_verified_email = match lookup("REQUIRE_VERIFIED_EMAIL") {
            Some(value) => parse_bool("REQUIRE_VERIFIED_EMAIL", &value)?,
            None => true,
        };

        let allowed_email_domains = lookup("ALLOWED_EMAIL_DOMAINS")
            .map(|value| {
                split_list(&value)
                    .into_iter()
                    .map(|domain| domain.trim_start_matches('@').to_ascii_lowercase())
                    .collect()
            })
            .unwrap_or_default();

        let rate_limit_enabled = match lookup("RATE_LIMIT_ENABLED") {
            Some(value) => parse_bool("RATE_LIMIT_ENABLED", &value)?,
            None => true,
        };
        let rate_limit = if rate_limit_enabled {
            let defaults = RateLimitSettings::default();
            let per_second = match lookup("RATE_LIMIT_PER_SECOND") {
                Some(value) => parse_number::<u64>("RATE_LIMIT_PER_SECOND", &value)?,
                None => defaults.per_second,
            };
            let burst_size = match lookup("RATE_LIMIT_BURST") {
                Some(value) => parse_number::<u32>("RATE_LIMIT_BURST", &value)?,
                None => defaults.burst_size,
            };
            if per_second == 0 || burst_size == 0 {
                return Err(ConfigError::Invalid(
                    "RATE_LIMIT_PER_SECOND and RATE_LIMIT_BURST must be positive".into(),
                ));
            }
            Some(RateLimitSettings {
                per_second,
                burst_size,
            })
        } else {
            None
        };

        Ok(Self {
            storage_backend,
            database_url,
            database_max_connections,
            listen_addr,
            identity_public_key,
            allowed_origins,
            require_verified_email,
            allowed_email_domains,
            rate_limit,
        })
    }

    pub fn storage_backend(&self) -> &StorageBackend {
        &self.storage_backend
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    pub fn database_max_connections(&self) -> u32 {
        self.database_max_connections
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn identity_public_key(&self) -> &str {
        &self.identity_public_key
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    pub fn require_verified_email(&self) -> bool {
        self.require_verified_email
    }

    pub fn allowed_email_domains(&self) -> &[String] {
        &self.allowed_email_domains
    }

    pub fn rate_limit(&self) -> Option<RateLimitSettings> {
        self.rate_limit
    }

    pub fn identity_policy(&self) -> IdentityPolicy {
        IdentityPolicy {
            require_verified_email: self.require_verified_email,
            allowed_email_domains: self.allowed_email_domains.clone(),
        }
    }

    pub fn router_options(&self) -> RouterOptions {
        RouterOptions {
            allowed_origins: self.allowed_origins.clone(),
            rate_limit: self.rate_limit,
        }
    }
}
