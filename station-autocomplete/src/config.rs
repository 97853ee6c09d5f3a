//! Server configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::autocomplete::{DEFAULT_MAX_QUERY_LENGTH, DEFAULT_MIN_QUERY_LENGTH, QueryLimits};
use crate::catalog::DEFAULT_CATALOG_PATH;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address.
    pub addr: SocketAddr,

    /// Path to the station catalog CSV.
    pub stations_csv: PathBuf,

    /// Accepted query lengths.
    pub limits: QueryLimits,

    /// Build the index at startup instead of on the first lookup.
    pub preload: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `BIND_ADDR` | Server bind address | `127.0.0.1:3000` |
    /// | `STATIONS_CSV` | Station catalog path | `data/stations.csv` |
    /// | `MIN_QUERY_LENGTH` | Shortest accepted query | `3` |
    /// | `MAX_QUERY_LENGTH` | Longest accepted query | `50` |
    /// | `PRELOAD_STATIONS` | Build the index at startup | `false` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let stations_csv = lookup("STATIONS_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH));

        let min_length = parse_length(&lookup, "MIN_QUERY_LENGTH", DEFAULT_MIN_QUERY_LENGTH)?;
        let max_length = parse_length(&lookup, "MAX_QUERY_LENGTH", DEFAULT_MAX_QUERY_LENGTH)?;
        if min_length > max_length {
            return Err(ConfigError::InvertedLimits {
                min: min_length,
                max: max_length,
            });
        }

        let preload = match lookup("PRELOAD_STATIONS").as_deref().map(str::trim) {
            None | Some("") => false,
            Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => true,
            Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => false,
            Some(v) => return Err(ConfigError::InvalidFlag {
                name: "PRELOAD_STATIONS",
                value: v.to_string(),
            }),
        };

        Ok(Self {
            addr,
            stations_csv,
            limits: QueryLimits::new(min_length, max_length),
            preload,
        })
    }
}

fn parse_length(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: usize,
) -> Result<usize, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidLength { name, value }),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid BIND_ADDR format")]
    InvalidAddr,

    #[error("{name} must be a non-negative integer, got {value:?}")]
    InvalidLength { name: &'static str, value: String },

    #[error("MIN_QUERY_LENGTH ({min}) exceeds MAX_QUERY_LENGTH ({max})")]
    InvertedLimits { min: usize, max: usize },

    #[error("{name} must be true or false, got {value:?}")]
    InvalidFlag { name: &'static str, value: String },
}
