//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;
use url::Url;

use user_service::settings::{ServiceSettings, SettingsError};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) downstream_url: Url,
    pub(crate) downstream_timeout: Duration,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a server configuration from explicit values.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, downstream_url: Url, downstream_timeout: Duration) -> Self {
        Self {
            bind_addr,
            downstream_url,
            downstream_timeout,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Resolve a server configuration from loaded settings.
    ///
    /// # Errors
    /// Propagates [`SettingsError`] for malformed host or URL values.
    pub fn from_settings(settings: &ServiceSettings) -> Result<Self, SettingsError> {
        Ok(Self::new(
            settings.bind_addr()?,
            settings.downstream_url()?,
            settings.downstream_timeout(),
        ))
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
