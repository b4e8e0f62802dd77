//! Session credential transport.
//!
//! Tokens travel in the `session_token` cookie or, failing that, an
//! `Authorization: Bearer` header. This module owns both directions: reading
//! the credential off a request and building the cookie sent on login and
//! cleared on logout.

use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite, time};
use actix_web::http::header::AUTHORIZATION;
use chrono::Duration;

use crate::domain::SessionToken;

/// Cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "session_token";

const BEARER_PREFIX: &str = "Bearer ";

/// Attributes applied to the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCookieSettings {
    pub secure: bool,
    pub same_site: SameSite,
}

impl Default for SessionCookieSettings {
    fn default() -> Self {
        Self {
            secure: true,
            same_site: SameSite::None,
        }
    }
}

impl SessionCookieSettings {
    /// Cookie handing `token` to the browser for `ttl`.
    pub fn issue(&self, token: &SessionToken, ttl: Duration) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE_NAME, token.expose().to_owned())
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .max_age(time::Duration::seconds(ttl.num_seconds()))
            .finish()
    }

    /// Expired cookie instructing the browser to drop the session.
    pub fn clear(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(SESSION_COOKIE_NAME, "")
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .finish();
        cookie.make_removal();
        cookie
    }
}

/// Credential presented with the request, cookie first.
///
/// Empty values are treated as absent.
pub fn presented_token(req: &HttpRequest) -> Option<SessionToken> {
    if let Some(token) = req
        .cookie(SESSION_COOKIE_NAME)
        .and_then(|cookie| SessionToken::new(cookie.value()).ok())
    {
        return Some(token);
    }
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .and_then(|raw| SessionToken::new(raw.trim()).ok())
}
