//! Port for login session storage.

use async_trait::async_trait;

use super::StoreError;
use crate::domain::{Session, SessionToken};

/// Storage for issued sessions, keyed by token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a new session. A token already in use yields
    /// [`StoreError::Conflict`].
    async fn insert(&self, session: &Session) -> Result<(), StoreError>;

    /// Look a session up by token, regardless of expiry.
    async fn find_by_token(&self, token: &SessionToken) -> Result<Option<Session>, StoreError>;

    /// Remove the session for `token`, reporting whether one existed.
    async fn delete_by_token(&self, token: &SessionToken) -> Result<bool, StoreError>;
}
