use std::env;
use std::str::FromStr;

use thiserror::Error;

pub mod database;

// Range bcrypt accepts for its cost factor
const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{name} has an invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Password hashing strength and the time allowed for one hash
#[derive(Debug, Clone)]
pub struct HashingConfig {
    pub cost: u32,
    pub timeout_secs: u64,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self { cost: bcrypt::DEFAULT_COST, timeout_secs: 10 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    pub enabled: bool,
    /// `*` or a comma separated list of origins
    pub allowed_origins: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub hashing: HashingConfig,
    pub cors: CorsConfig,
}

impl AppConfig {
    /// Read the whole configuration from environment variables.
    ///
    /// `DATABASE_URL` is required; everything else has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`AppConfig::from_env`] but reading variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let cost = parse_or(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
            return Err(ConfigError::Invalid {
                name: "BCRYPT_COST",
                value: cost.to_string(),
                reason: format!("must be between {} and {}", MIN_BCRYPT_COST, MAX_BCRYPT_COST),
            });
        }

        Ok(Self {
            server: ServerConfig {
                host: lookup("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
                port: parse_or(&lookup, "APP_PORT", 3002u16)?,
            },
            database: DatabaseConfig {
                url,
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5u32)?,
            },
            hashing: HashingConfig {
                cost,
                timeout_secs: parse_or(&lookup, "HASH_TIMEOUT_SECS", 10u64)?,
            },
            cors: CorsConfig {
                enabled: lookup("ENABLE_CORS").is_some_and(|v| v == "true" || v == "1"),
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS"),
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
