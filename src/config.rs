use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Kalshi's public trade API
pub const DEFAULT_KALSHI_API_URL: &str = "https://api.elections.kalshi.com/trade-api/v2";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} not set in environment")]
    Missing(&'static str),

    #[error("Invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings shared by all binaries, read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub history_api_url: Option<String>,
    pub kalshi_api_url: String,
    pub db_max_connections: u32,
    pub http_timeout: Duration,
}

impl Config {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let db_max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 5u32)?;
        let timeout_secs = parse_or(&lookup, "HTTP_TIMEOUT_SECS", 10u64)?;

        Ok(Config {
            database_url: non_empty("DATABASE_URL"),
            history_api_url: non_empty("PM_API_URL"),
            kalshi_api_url: non_empty("KALSHI_API_URL")
                .unwrap_or_else(|| DEFAULT_KALSHI_API_URL.to_string()),
            db_max_connections,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// A non-blank `url` replaces the `DATABASE_URL` value
    pub fn with_database_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.database_url = Some(url);
        }
        self
    }

    /// `DATABASE_URL` is only mandatory for commands that write snapshots
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or(ConfigError::Missing("DATABASE_URL"))
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                value: raw.clone(),
                reason: e.to_string(),
            })
        }
        _ => Ok(default),
    }
}
