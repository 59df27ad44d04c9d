use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::services::rate_limiter::{RateLimit, RateLimits};

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_OSRM_URL: &str = "https://router.project-osrm.org";
pub const DEFAULT_USER_AGENT: &str = "map-scheduler-app";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: Option<String>,
    pub mongodb_database: String,
    pub nominatim_url: String,
    pub osrm_url: String,
    pub user_agent: String,
    pub seed_csv: Option<String>,
    pub geocode_cache_ttl: Duration,
    pub rate_limits: RateLimits,
}

impl Config {
    /// Reads the process environment (after `.env` has been loaded).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = RateLimits::default();

        Ok(Config {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&var, "PORT", 80)?,
            mongodb_uri: var("MONGODB_URI"),
            mongodb_database: var("MONGODB_DATABASE").unwrap_or_else(|| "map_scheduler".to_string()),
            nominatim_url: var("NOMINATIM_URL").unwrap_or_else(|| DEFAULT_NOMINATIM_URL.to_string()),
            osrm_url: var("OSRM_URL").unwrap_or_else(|| DEFAULT_OSRM_URL.to_string()),
            user_agent: var("GEOCODER_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            seed_csv: var("SEED_CSV"),
            geocode_cache_ttl: Duration::from_secs(parse_or(&var, "GEOCODE_CACHE_TTL_SECS", 3600)?),
            rate_limits: RateLimits {
                read: RateLimit {
                    max_calls: parse_or(&var, "READ_LIMIT_PER_SEC", defaults.read.max_calls)?,
                    ..defaults.read
                },
                write: RateLimit {
                    max_calls: parse_or(&var, "WRITE_LIMIT_PER_SEC", defaults.write.max_calls)?,
                    ..defaults.write
                },
                total_reads: RateLimit {
                    max_calls: parse_or(
                        &var,
                        "TOTAL_READ_LIMIT_PER_10_SEC",
                        defaults.total_reads.max_calls,
                    )?,
                    ..defaults.total_reads
                },
            },
        })
    }
}

fn parse_or<T, F>(var: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {key}: {raw}")),
        None => Ok(default),
    }
}
