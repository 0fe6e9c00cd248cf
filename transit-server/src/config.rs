//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::CacheConfig;

/// Errors that can occur when reading configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable holds a value that does not parse
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Configuration for the transit server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,

    /// JSON snapshot to seed the store from. Start empty when unset.
    pub snapshot_path: Option<PathBuf>,

    /// Shortest-path cache settings.
    pub cache: CacheConfig,
}

impl AppConfig {
    pub const BIND_ADDR_VAR: &'static str = "TRANSIT_BIND_ADDR";
    pub const SNAPSHOT_VAR: &'static str = "TRANSIT_SNAPSHOT";
    pub const CACHE_TTL_VAR: &'static str = "TRANSIT_CACHE_TTL_SECS";
    pub const CACHE_CAPACITY_VAR: &'static str = "TRANSIT_CACHE_CAPACITY";

    /// Read configuration from the process environment.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(Self::BIND_ADDR_VAR) {
            config.bind_addr = parse_var(Self::BIND_ADDR_VAR, &raw)?;
        }
        if let Some(raw) = lookup(Self::SNAPSHOT_VAR)
            && !raw.trim().is_empty()
        {
            config.snapshot_path = Some(PathBuf::from(raw.trim()));
        }
        if let Some(raw) = lookup(Self::CACHE_TTL_VAR) {
            let secs: u64 = parse_var(Self::CACHE_TTL_VAR, &raw)?;
            config.cache.ttl = Duration::from_secs(secs);
        }
        if let Some(raw) = lookup(Self::CACHE_CAPACITY_VAR) {
            config.cache.max_capacity = parse_var(Self::CACHE_CAPACITY_VAR, &raw)?;
        }

        Ok(config)
    }

    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            snapshot_path: None,
            cache: CacheConfig::default(),
        }
    }
}

fn parse_var<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
