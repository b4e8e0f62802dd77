//! Sessions and the credentials exchanged for them.

use chrono::{DateTime, Duration, Utc};
use zeroize::Zeroizing;

use super::{EmailAddress, UserId};

/// Default lifetime of a freshly issued session.
pub const DEFAULT_SESSION_TTL_DAYS: i64 = 7;

/// Opaque bearer credential identifying a session.
///
/// The value is wiped from memory on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(Zeroizing<String>);

/// Raised for blank session tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("session token must not be empty")]
pub struct EmptySessionToken;

impl SessionToken {
    /// Wrap a non-blank token.
    pub fn new(raw: impl Into<String>) -> Result<Self, EmptySessionToken> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EmptySessionToken);
        }
        Ok(Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// Raw token value, for cookies and lookups only.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// A login session binding a token to an account until `expires_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: UserId,
    pub token: SessionToken,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Issue a session valid for `ttl` starting at `now`.
    pub fn issue(user_id: UserId, token: SessionToken, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            user_id,
            token,
            expires_at: now + ttl,
            created_at: now,
        }
    }

    /// The single validity predicate: a session is usable strictly before
    /// its expiry instant.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Identifier handed to the client by the external identity provider.
#[derive(Clone, PartialEq, Eq)]
pub struct ExternalSessionId(Zeroizing<String>);

/// Raised when the external session id is blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("X-Session-ID header is required")]
pub struct MissingExternalSessionId;

impl ExternalSessionId {
    /// Wrap a non-blank external session id.
    pub fn new(raw: impl Into<String>) -> Result<Self, MissingExternalSessionId> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MissingExternalSessionId);
        }
        Ok(Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// Raw id, sent to the identity provider.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for ExternalSessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ExternalSessionId(<redacted>)")
    }
}

/// Profile and fresh session token returned by the identity provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalIdentity {
    pub email: EmailAddress,
    pub name: String,
    pub picture: Option<String>,
    pub session_token: SessionToken,
}
