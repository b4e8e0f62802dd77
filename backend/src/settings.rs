//! Service settings loaded via OrthoConfig.
//!
//! Values come from `DAYBOOK_*` environment variables or matching command-line
//! flags. Every field is optional; accessors supply the defaults.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_IDENTITY_PROVIDER_URL: &str =
    "https://demobackend.emergentagent.com/auth/v1/env/oauth/session-data";
const DEFAULT_IDENTITY_TIMEOUT_MS: u64 = 10_000;

/// Raised when a configured value cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not `host:port`.
    #[error("invalid bind address `{value}`: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    /// The identity provider endpoint is not a URL.
    #[error("invalid identity provider url `{value}`: {source}")]
    IdentityProviderUrl {
        value: String,
        source: url::ParseError,
    },
    /// The session lifetime is shorter than a day.
    #[error("session ttl must be at least one day, got {0}")]
    SessionTtl(i64),
}

/// Configuration values controlling the HTTP service at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DAYBOOK")]
pub struct ServiceSettings {
    /// Socket address the HTTP server listens on.
    pub bind_addr: Option<String>,
    /// Endpoint exchanging an external session id for a profile.
    pub identity_provider_url: Option<String>,
    /// Time budget for one identity provider call, in milliseconds.
    pub identity_timeout_ms: Option<u64>,
    /// Lifetime of an issued session, in days.
    pub session_ttl_days: Option<i64>,
    /// Mark the session cookie `Secure`. Disable only for plain-HTTP development.
    pub cookie_secure: Option<bool>,
}

impl ServiceSettings {
    /// Listen address, defaulting to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`SettingsError::BindAddr`] when the value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Identity provider session-data endpoint.
    ///
    /// # Errors
    /// Returns [`SettingsError::IdentityProviderUrl`] for unparsable URLs.
    pub fn identity_provider_url(&self) -> Result<Url, SettingsError> {
        let value = self
            .identity_provider_url
            .as_deref()
            .unwrap_or(DEFAULT_IDENTITY_PROVIDER_URL);
        Url::parse(value).map_err(|source| SettingsError::IdentityProviderUrl {
            value: value.to_owned(),
            source,
        })
    }

    /// Bound on one identity provider call, 10 seconds unless configured.
    pub fn identity_timeout(&self) -> Duration {
        Duration::from_millis(
            self.identity_timeout_ms
                .unwrap_or(DEFAULT_IDENTITY_TIMEOUT_MS),
        )
    }

    /// Session lifetime.
    ///
    /// # Errors
    /// Returns [`SettingsError::SessionTtl`] for lifetimes under one day.
    pub fn session_ttl(&self) -> Result<chrono::Duration, SettingsError> {
        match self
            .session_ttl_days
            .unwrap_or(crate::domain::DEFAULT_SESSION_TTL_DAYS)
        {
            days if days >= 1 => Ok(chrono::Duration::days(days)),
            days => Err(SettingsError::SessionTtl(days)),
        }
    }

    /// Whether the session cookie carries `Secure`; on unless disabled.
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }
}
