//! Request extractors resolving the caller.
//!
//! Handlers take [`AuthenticatedUser`] when a session is mandatory and
//! [`MaybeUser`] when anonymous callers are served too. Both defer to the
//! domain [`SessionAuthenticator`](crate::domain::SessionAuthenticator) held
//! in [`HttpState`].

use std::ops::Deref;

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, User};

use super::session::presented_token;
use super::state::HttpState;

/// Caller with a valid session. Extraction fails with `401` otherwise.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl AuthenticatedUser {
    /// Unwrap the resolved account.
    pub fn into_inner(self) -> User {
        self.0
    }
}

impl Deref for AuthenticatedUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Caller identity when one is presented and valid; never fails for
/// anonymous requests.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

fn state_of(req: &HttpRequest) -> Result<web::Data<HttpState>, Error> {
    req.app_data::<web::Data<HttpState>>()
        .cloned()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = state_of(req);
        let token = presented_token(req);
        Box::pin(async move {
            let state = state?;
            let user = state.authenticator.require(token.as_ref()).await?;
            Ok(Self(user))
        })
    }
}

impl FromRequest for MaybeUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = state_of(req);
        let token = presented_token(req);
        Box::pin(async move {
            let state = state?;
            let user = state.authenticator.identify(token.as_ref()).await?;
            Ok(Self(user))
        })
    }
}
