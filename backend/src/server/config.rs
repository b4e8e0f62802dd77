//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;
use url::Url;

use daybook::inbound::http::state::SessionPolicy;

/// Default time budget for one identity provider call.
pub const DEFAULT_IDENTITY_TIMEOUT: Duration = Duration::from_secs(10);

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) identity_endpoint: Url,
    pub(crate) identity_timeout: Duration,
    pub(crate) session: SessionPolicy,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a server configuration with the default session policy.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, identity_endpoint: Url) -> Self {
        Self {
            bind_addr,
            identity_endpoint,
            identity_timeout: DEFAULT_IDENTITY_TIMEOUT,
            session: SessionPolicy::default(),
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Bound on one identity provider call.
    #[must_use]
    pub fn with_identity_timeout(mut self, timeout: Duration) -> Self {
        self.identity_timeout = timeout;
        self
    }

    /// Override session lifetime and cookie attributes.
    #[must_use]
    pub fn with_session_policy(mut self, session: SessionPolicy) -> Self {
        self.session = session;
        self
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
