//! Authentication handlers.
//!
//! ```text
//! POST /api/auth/session   (X-Session-ID: <external id>)
//! GET  /api/auth/me
//! POST /api/auth/logout
//! ```

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, ExternalSessionId, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{AuthenticatedUser, MaybeUser};
use crate::inbound::http::messages::MessageResponse;
use crate::inbound::http::session::presented_token;
use crate::inbound::http::state::HttpState;

/// Header carrying the identity provider's ephemeral session id.
pub const EXTERNAL_SESSION_HEADER: &str = "X-Session-ID";

/// Body returned after a successful exchange.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub user: User,
    pub session_token: String,
}

fn external_session_id(req: &HttpRequest) -> Result<ExternalSessionId, Error> {
    let raw = req
        .headers()
        .get(EXTERNAL_SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    ExternalSessionId::new(raw).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "header": EXTERNAL_SESSION_HEADER }))
    })
}

/// Exchange an identity provider session for a local session.
///
/// Sets the `session_token` cookie and echoes the token in the body for
/// clients that prefer bearer authentication.
#[utoipa::path(
    post,
    path = "/api/auth/session",
    params(("X-Session-ID" = String, Header, description = "Identity provider session id")),
    responses(
        (status = 200, description = "Session issued", body = SessionResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Missing session id", body = Error),
        (status = 401, description = "Identity provider rejected the session", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "exchangeSession",
    security([])
)]
#[post("/auth/session")]
pub async fn exchange_session(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let external = external_session_id(&req)?;
    let issued = state.login.exchange(&external).await?;
    let cookie = state.cookie.issue(&issued.session.token, state.login.ttl());
    Ok(HttpResponse::Ok().cookie(cookie).json(SessionResponse {
        user: issued.user,
        session_token: issued.session.token.expose().to_owned(),
    }))
}

/// Return the authenticated caller.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Not authenticated", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentUser"
)]
#[get("/auth/me")]
pub async fn current_user(user: AuthenticatedUser) -> web::Json<User> {
    web::Json(user.into_inner())
}

/// Drop the presented session, if any, and clear the cookie.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    caller: MaybeUser,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    if let Some(token) = presented_token(&req) {
        state.login.logout(caller.0.as_ref(), &token).await?;
    }
    Ok(HttpResponse::Ok()
        .cookie(state.cookie.clear())
        .json(MessageResponse::new("Logged out successfully")))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
