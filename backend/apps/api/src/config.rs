//! Server Configuration
//!
//! Read from the process environment (after `.env` is loaded). Parsing goes
//! through a lookup function so tests never touch the real environment.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_MAX_LIFETIME_SECS: u64 = 3600;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173";
const DEFAULT_JWT_TTL_HOURS: u64 = 168;

/// Everything `main` needs to start serving
#[derive(Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub database_max_lifetime: Duration,
    pub bind_addr: SocketAddr,
    pub request_timeout: Duration,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        let database_max_connections =
            parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let database_max_lifetime = Duration::from_secs(parse_or(
            &lookup,
            "DATABASE_MAX_LIFETIME_SECS",
            DEFAULT_MAX_LIFETIME_SECS,
        )?);

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        let request_timeout = Duration::from_secs(parse_or(
            &lookup,
            "REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?);

        let frontend_origins = lookup("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let token_ttl_hours: u64 = parse_or(&lookup, "JWT_TTL_HOURS", DEFAULT_JWT_TTL_HOURS)?;
        let token_ttl = token_ttl_hours
            .checked_mul(3600)
            .map(Duration::from_secs)
            .context("JWT_TTL_HOURS is too large")?;

        let auth = match lookup("JWT_SECRET") {
            Some(secret) => {
                let config = AuthConfig::with_secret(secret);
                if !config.has_usable_secret() {
                    bail!("JWT_SECRET must be at least 16 bytes");
                }
                config
            }
            None if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using a random secret for this process");
                AuthConfig::development()
            }
            None => bail!("JWT_SECRET must be set in production"),
        }
        .with_token_ttl(token_ttl);

        Ok(Self {
            database_url,
            database_max_connections,
            database_max_lifetime,
            bind_addr,
            request_timeout,
            frontend_origins,
            auth,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        None => Ok(default),
    }
}
