//! Gateway configuration read from environment variables.

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A variable was set to a value that cannot be used.
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Locations of the landing page and static asset directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    /// Directory served for paths no API route claims.
    pub public_dir: PathBuf,
    /// File served at `/`.
    pub index_page: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            index_page: PathBuf::from(DEFAULT_INDEX_PAGE),
        }
    }
}

/// Runtime configuration for the gateway binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub host: IpAddr,
    pub port: u16,
    pub assets: AssetPaths,
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_PUBLIC_DIR: &str = "public";
const DEFAULT_INDEX_PAGE: &str = "views/index.html";
const DEFAULT_LOG_LEVEL: &str = "info";

impl GatewayConfig {
    /// Read configuration from the process environment.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `PORT` | `3000` |
    /// | `TRACKER_HOST` | `0.0.0.0` |
    /// | `TRACKER_PUBLIC_DIR` | `public` |
    /// | `TRACKER_INDEX_PAGE` | `views/index.html` |
    /// | `TRACKER_LOG` | `info` |
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] if `PORT` or `TRACKER_HOST` do not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value
    /// if it is set.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] if `PORT` or `TRACKER_HOST` do not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let port = match var("PORT") {
            Some(value) => value.parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                key: "PORT",
                value,
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let host = match var("TRACKER_HOST") {
            Some(value) => value.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                key: "TRACKER_HOST",
                value,
                reason: e.to_string(),
            })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let assets = AssetPaths {
            public_dir: var("TRACKER_PUBLIC_DIR").map_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DIR), PathBuf::from),
            index_page: var("TRACKER_INDEX_PAGE").map_or_else(|| PathBuf::from(DEFAULT_INDEX_PAGE), PathBuf::from),
        };

        Ok(Self {
            host,
            port,
            assets,
            log_level: var("TRACKER_LOG").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned()),
        })
    }

    /// Socket address to bind.
    #[must_use]
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
