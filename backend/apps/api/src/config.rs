//! Process configuration
//!
//! Read once from the environment (after `.env` is loaded) at startup.

use std::time::Duration;

use account::AccountConfig;
use account::application::config::DEFAULT_TOKEN_LIFETIME_HOURS;
use anyhow::{Context, Result, bail};

const DEFAULT_PORT: u16 = 1323;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 10;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug)]
pub struct ApiConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub shutdown_timeout: Duration,
    pub frontend_origins: Vec<String>,
    pub account: AccountConfig,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| -> Result<String> {
            match lookup(key) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => bail!("{key} must be set in environment"),
            }
        };

        let database_url = required("DATABASE_URL")?;
        let private_key = unescape_pem(&required("RSA_PRIVATE_KEY")?);
        let public_key = unescape_pem(&required("RSA_PUBLIC_KEY")?);

        let token_lifetime_hours = parse_or(
            &lookup,
            "JWT_TOKEN_LIFETIME_IN_HOURS",
            DEFAULT_TOKEN_LIFETIME_HOURS,
        )?;
        if token_lifetime_hours <= 0 {
            bail!("JWT_TOKEN_LIFETIME_IN_HOURS must be positive, got {token_lifetime_hours}");
        }

        let frontend_origins = lookup("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_owned())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect();

        Ok(Self {
            database_url,
            database_max_connections: parse_or(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_MAX_CONNECTIONS,
            )?,
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            shutdown_timeout: Duration::from_secs(parse_or(
                &lookup,
                "SHUTDOWN_TIMEOUT_SECS",
                DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            )?),
            frontend_origins,
            account: AccountConfig::new(private_key, public_key)
                .with_token_lifetime_hours(token_lifetime_hours),
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        _ => Ok(default),
    }
}

/// Keys kept on one line in `.env` carry literal `\n` sequences
fn unescape_pem(raw: &str) -> String {
    raw.replace("\\n", "\n")
}
