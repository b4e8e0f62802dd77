//! Driven port for the external identity provider.
//!
//! The provider trades a short-lived external session identifier for the
//! user's profile and a session token this service then honours.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{ExternalIdentity, ExternalSessionId};

define_port_error! {
    /// Errors surfaced while calling the identity provider.
    pub enum IdentityProviderError {
        /// The provider answered but refused the session identifier.
        Rejected { status: u16 } => "identity provider rejected the session with status {status}",
        /// The call exceeded its time budget.
        Timeout { message: String } => "identity provider timed out: {message}",
        /// The request never produced a response.
        Transport { message: String } => "identity provider transport failed: {message}",
        /// The response body was not a usable identity.
        Decode { message: String } => "identity provider response invalid: {message}",
    }
}

/// Exchanges an external session id for the identity behind it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn exchange(
        &self,
        session_id: &ExternalSessionId,
    ) -> Result<ExternalIdentity, IdentityProviderError>;
}
