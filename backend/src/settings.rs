//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `USER_SERVICE_*` environment variables, and
//! configuration files, in OrthoConfig's usual precedence. Every field is
//! optional; accessors apply the defaults.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DOWNSTREAM_URL: &str = "http://localhost:8001";
const DEFAULT_DOWNSTREAM_TIMEOUT_SECS: u64 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// `host` is not an IP address.
    #[error("invalid host {host:?}: {source}")]
    InvalidHost {
        /// Offending value.
        host: String,
        /// Parser diagnostic.
        #[source]
        source: std::net::AddrParseError,
    },
    /// `downstream_url` is not an absolute URL.
    #[error("invalid downstream URL {url:?}: {source}")]
    InvalidDownstreamUrl {
        /// Offending value.
        url: String,
        /// Parser diagnostic.
        #[source]
        source: url::ParseError,
    },
}

/// Configuration for the user service process.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_SERVICE")]
pub struct ServiceSettings {
    /// Interface to bind, e.g. `0.0.0.0`.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// Base URL of the downstream processing service.
    pub downstream_url: Option<String>,
    /// Per-call deadline for downstream requests, in seconds.
    pub downstream_timeout_secs: Option<u64>,
}

impl ServiceSettings {
    /// Socket address the HTTP server binds to.
    ///
    /// # Errors
    /// [`SettingsError::InvalidHost`] when `host` is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let ip: IpAddr = host.parse().map_err(|source| SettingsError::InvalidHost {
            host: host.to_owned(),
            source,
        })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Base URL of the processing service.
    ///
    /// # Errors
    /// [`SettingsError::InvalidDownstreamUrl`] when the value does not parse.
    pub fn downstream_url(&self) -> Result<Url, SettingsError> {
        let raw = self
            .downstream_url
            .as_deref()
            .unwrap_or(DEFAULT_DOWNSTREAM_URL);
        Url::parse(raw).map_err(|source| SettingsError::InvalidDownstreamUrl {
            url: raw.to_owned(),
            source,
        })
    }

    /// Per-call downstream deadline; never shorter than one second.
    #[must_use]
    pub fn downstream_timeout(&self) -> Duration {
        let secs = self
            .downstream_timeout_secs
            .unwrap_or(DEFAULT_DOWNSTREAM_TIMEOUT_SECS)
            .max(1);
        Duration::from_secs(secs)
    }
}
