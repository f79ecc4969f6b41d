use std::env;
use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct Config {
    /// Postgres connection string with any `+driver` suffix removed
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub db_max_connections: u32,
    /// How many times to retry the database before giving up at startup
    pub db_connect_retries: u32,
    pub db_connect_interval: Duration,
    /// Log every SQL statement
    pub db_echo: bool,
    pub max_upload_bytes: usize,
    /// Users seeded at startup as (name, api_key)
    pub bootstrap_users: Vec<(String, String)>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            database_url: normalize_database_url(&database_url)?,
            host: parse_or(&lookup, "HOST", IpAddr::from([0, 0, 0, 0]))?,
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            db_connect_retries: parse_or(&lookup, "DB_CONNECT_RETRIES", 5)?,
            db_connect_interval: Duration::from_secs(parse_or(
                &lookup,
                "DB_CONNECT_INTERVAL_SECS",
                5,
            )?),
            db_echo: parse_or(&lookup, "DB_ECHO", false)?,
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            bootstrap_users: lookup("BOOTSTRAP_USERS")
                .map(|v| parse_bootstrap_users(&v))
                .transpose()?
                .unwrap_or_default(),
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
        Some(value) if !value.trim().is_empty() => {
            value
                .trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::Invalid {
                    name,
                    value: value.clone(),
                    reason: e.to_string(),
                })
        }
        _ => Ok(default),
    }
}

/// Strip a SQLAlchemy-style driver qualifier (`postgresql+asyncpg://`)
///
/// Both `postgres://` and `postgresql://` are accepted as-is.
pub fn normalize_database_url(url: &str) -> Result<String, ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        name: "DATABASE_URL",
        value: url.to_string(),
        reason: reason.to_string(),
    };

    let (scheme, rest) = url
        .trim()
        .split_once("://")
        .ok_or_else(|| invalid("missing scheme"))?;

    let base_scheme = scheme.split('+').next().unwrap_or(scheme);
    match base_scheme {
        "postgres" | "postgresql" => Ok(format!("{}://{}", base_scheme, rest)),
        _ => Err(invalid("expected a postgres:// or postgresql:// URL")),
    }
}

/// Parse `name:api_key` pairs separated by commas
fn parse_bootstrap_users(value: &str) -> Result<Vec<(String, String)>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once(':') {
            Some((name, key)) if !name.trim().is_empty() && !key.trim().is_empty() => {
                Ok((name.trim().to_string(), key.trim().to_string()))
            }
            _ => Err(ConfigError::Invalid {
                name: "BOOTSTRAP_USERS",
                value: entry.to_string(),
                reason: "expected name:api_key".to_string(),
            }),
        })
        .collect()
}
