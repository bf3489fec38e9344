//! SSO service configuration.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

use common::{DatabaseConfig, Environment, ServiceConfig, TokenConfig};
use domain::HashCost;

/// Raised when an environment variable is present but unusable.
#[derive(Error, Debug)]
#[error("invalid value '{value}' for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// SSO service configuration.
#[derive(Debug, Clone, Default)]
pub struct SsoConfig {
    /// Deployment environment (drives log format)
    pub env: Environment,
    /// Bind address and request deadline
    pub service: ServiceConfig,
    /// Credential store location
    pub database: DatabaseConfig,
    /// Token lifetime
    pub token: TokenConfig,
    /// Argon2 work factor for new password hashes
    pub hash_cost: HashCost,
}

impl SsoConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let database_url = lookup("SSO_DATABASE_URL")
            .or_else(|| lookup("DATABASE_URL"))
            .unwrap_or(defaults.database.url);

        Ok(Self {
            env: parse(&lookup, "SSO_ENV", defaults.env)?,
            service: ServiceConfig {
                service_name: defaults.service.service_name,
                host: lookup("SSO_HOST").unwrap_or(defaults.service.host),
                port: parse(&lookup, "SSO_PORT", defaults.service.port)?,
                request_timeout_secs: parse(
                    &lookup,
                    "SSO_REQUEST_TIMEOUT_SECS",
                    defaults.service.request_timeout_secs,
                )?,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: parse(
                    &lookup,
                    "SSO_DATABASE_MAX_CONNECTIONS",
                    defaults.database.max_connections,
                )?,
                min_connections: defaults.database.min_connections,
                connect_timeout_secs: defaults.database.connect_timeout_secs,
            },
            token: TokenConfig {
                ttl_secs: parse(&lookup, "SSO_TOKEN_TTL_SECS", defaults.token.ttl_secs)?,
            },
            hash_cost: parse(&lookup, "SSO_PASSWORD_HASH_COST", defaults.hash_cost)?,
        })
    }
}

fn parse<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|e| ConfigError {
                var,
                reason: e.to_string(),
                value,
            })
        }
    }
}
