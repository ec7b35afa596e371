use std::net::SocketAddr;
use thiserror::Error;

pub const BIND_ADDR_VAR: &str = "SEATING_BIND_ADDR";
pub const LOG_VAR: &str = "SEATING_LOG";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var} '{value}': {source}")]
    InvalidAddr {
        var: &'static str,
        value: String,
        source: std::net::AddrParseError,
    },
}

/// Settings for the HTTP front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Default `env_logger` filter; `RUST_LOG` still wins when set.
    pub log_filter: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = addr.parse().map_err(|source| ConfigError::InvalidAddr {
            var: BIND_ADDR_VAR,
            value: addr.clone(),
            source,
        })?;

        Ok(Self {
            bind_addr,
            log_filter: lookup(LOG_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}
