//! Exchange an external identity-provider session for a local session.

use std::sync::Arc;

use chrono::Duration;
use mockable::Clock;
use tracing::{info, warn};

use super::ports::{
    IdentityProvider, IdentityProviderError, SessionRepository, UserRepository, map_store_error,
};
use super::{DEFAULT_SESSION_TTL_DAYS, Error, ExternalSessionId, Session, SessionToken, User};

/// Outcome of a successful login.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedSession {
    pub user: User,
    pub session: Session,
}

/// Login and logout use cases.
#[derive(Clone)]
pub struct LoginService {
    identity: Arc<dyn IdentityProvider>,
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl LoginService {
    /// Build the service.
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            identity,
            users,
            sessions,
            clock,
            ttl: Duration::days(DEFAULT_SESSION_TTL_DAYS),
        }
    }

    /// Override the lifetime of issued sessions.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Lifetime of issued sessions.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Trade an external session identifier for a local session.
    ///
    /// The account is created on first login and reused afterwards; profile
    /// fields are never refreshed from later logins. Every successful call
    /// issues a new session, leaving earlier sessions valid.
    pub async fn exchange(&self, external: &ExternalSessionId) -> Result<IssuedSession, Error> {
        let identity = self
            .identity
            .exchange(external)
            .await
            .map_err(map_identity_error)?;
        let now = self.clock.utc();

        let candidate = User::register(identity.email, identity.name, identity.picture, now);
        let user = self
            .users
            .find_or_insert(&candidate)
            .await
            .map_err(map_store_error)?;
        if user.user_id == candidate.user_id {
            info!(user_id = %user.user_id, "account created on first login");
        }

        let session = Session::issue(user.user_id, identity.session_token, now, self.ttl);
        self.sessions
            .insert(&session)
            .await
            .map_err(map_store_error)?;
        info!(user_id = %user.user_id, expires_at = %session.expires_at, "session issued");
        Ok(IssuedSession { user, session })
    }

    /// Remove the session behind `token`. Unknown tokens are not an error.
    ///
    /// `caller` is the account the token still resolves to, if any; expired
    /// sessions resolve to nobody but are removed all the same.
    pub async fn logout(&self, caller: Option<&User>, token: &SessionToken) -> Result<bool, Error> {
        let removed = self
            .sessions
            .delete_by_token(token)
            .await
            .map_err(map_store_error)?;
        match (removed, caller) {
            (true, Some(user)) => info!(user_id = %user.user_id, "session revoked by logout"),
            (true, None) => info!("stale session revoked by logout"),
            (false, _) => {}
        }
        Ok(removed)
    }
}

fn map_identity_error(err: IdentityProviderError) -> Error {
    warn!(error = %err, "identity exchange failed");
    match err {
        IdentityProviderError::Rejected { .. } => Error::invalid_external_session("invalid session"),
        IdentityProviderError::Timeout { .. } => {
            Error::invalid_external_session("identity provider did not answer in time")
        }
        IdentityProviderError::Transport { .. } | IdentityProviderError::Decode { .. } => {
            Error::invalid_external_session("identity provider unavailable")
        }
    }
}
