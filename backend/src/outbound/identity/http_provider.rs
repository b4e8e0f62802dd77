//! Reqwest-backed identity provider adapter.
//!
//! The adapter owns transport details only: the session header, the bounded
//! timeout, status mapping, and decoding into a domain identity.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::SessionDataDto;
use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::{ExternalIdentity, ExternalSessionId};

/// Header carrying the external session identifier.
pub const SESSION_ID_HEADER: &str = "X-Session-ID";

/// [`IdentityProvider`] speaking HTTP to the session-data endpoint.
pub struct HttpIdentityProvider {
    client: Client,
    endpoint: Url,
}

impl HttpIdentityProvider {
    /// Build an adapter whose every call is bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn exchange(
        &self,
        session_id: &ExternalSessionId,
    ) -> Result<ExternalIdentity, IdentityProviderError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(SESSION_ID_HEADER, session_id.expose())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        expect_ok(status)?;
        parse_identity(body.as_ref())
    }
}

fn parse_identity(body: &[u8]) -> Result<ExternalIdentity, IdentityProviderError> {
    let decoded: SessionDataDto = serde_json::from_slice(body).map_err(|error| {
        IdentityProviderError::decode(format!("invalid session-data payload: {error}"))
    })?;
    decoded
        .into_identity()
        .map_err(IdentityProviderError::decode)
}

fn map_transport_error(error: reqwest::Error) -> IdentityProviderError {
    if error.is_timeout() {
        IdentityProviderError::timeout(error.to_string())
    } else {
        IdentityProviderError::transport(error.to_string())
    }
}

/// Only `200 OK` carries an identity; any other status, 2xx included, fails.
fn expect_ok(status: StatusCode) -> Result<(), IdentityProviderError> {
    if status == StatusCode::OK {
        Ok(())
    } else {
        Err(map_status_error(status))
    }
}

fn map_status_error(status: StatusCode) -> IdentityProviderError {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            IdentityProviderError::timeout(format!("status {}", status.as_u16()))
        }
        _ if status.is_server_error() => {
            IdentityProviderError::transport(format!("status {}", status.as_u16()))
        }
        _ => IdentityProviderError::rejected(status.as_u16()),
    }
}
