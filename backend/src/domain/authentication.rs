//! Resolve a presented session token to the account behind it.
//!
//! Expiry is evaluated lazily: expired sessions stay in the store and are
//! simply ignored here.

use std::sync::Arc;

use mockable::Clock;
use tracing::debug;

use super::ports::{SessionRepository, UserRepository, map_store_error};
use super::{Error, SessionToken, User};

/// Resolves session tokens to accounts.
#[derive(Clone)]
pub struct SessionAuthenticator {
    sessions: Arc<dyn SessionRepository>,
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl SessionAuthenticator {
    /// Build an authenticator over the session and user stores.
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        users: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sessions,
            users,
            clock,
        }
    }

    /// Identify the caller, treating any credential problem as anonymous.
    ///
    /// Only store failures are reported as errors.
    pub async fn identify(&self, token: Option<&SessionToken>) -> Result<Option<User>, Error> {
        let Some(token) = token else {
            return Ok(None);
        };
        let Some(session) = self
            .sessions
            .find_by_token(token)
            .await
            .map_err(map_store_error)?
        else {
            debug!("unknown session token presented");
            return Ok(None);
        };
        if !session.is_valid_at(self.clock.utc()) {
            debug!(user_id = %session.user_id, "expired session presented");
            return Ok(None);
        }
        let user = self
            .users
            .find_by_id(&session.user_id)
            .await
            .map_err(map_store_error)?;
        if user.is_none() {
            debug!(user_id = %session.user_id, "session references a missing account");
        }
        Ok(user)
    }

    /// Identify the caller or fail with `unauthorized`.
    pub async fn require(&self, token: Option<&SessionToken>) -> Result<User, Error> {
        self.identify(token)
            .await?
            .ok_or_else(|| Error::unauthorized("not authenticated"))
    }
}
