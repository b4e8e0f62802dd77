//! Sharing handlers: invites and collaborator management.
//!
//! ```text
//! POST   /api/share/invite                      {"baby_id":"…","invitee_email":"helper@example.com"}
//! GET    /api/share/invites/pending
//! POST   /api/share/invite/{invite_id}/accept
//! POST   /api/share/invite/{invite_id}/decline
//! DELETE /api/share/{baby_id}/{user_id}
//! ```

use actix_web::{delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BabyId, EmailAddress, Error, InviteId, PendingInvite, ShareInvite, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::messages::MessageResponse;
use crate::inbound::http::state::HttpState;

/// Body of `POST /api/share/invite`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateInviteRequest {
    pub baby_id: BabyId,
    pub invitee_email: EmailAddress,
}

/// Invite someone to collaborate on a baby the caller owns.
#[utoipa::path(
    post,
    path = "/api/share/invite",
    request_body = CreateInviteRequest,
    responses(
        (status = 200, description = "Invite created", body = ShareInvite),
        (status = 400, description = "Invalid request or duplicate pending invite", body = Error),
        (status = 403, description = "Caller is not the owner", body = Error),
        (status = 404, description = "Unknown baby", body = Error)
    ),
    tags = ["sharing"],
    operation_id = "createInvite"
)]
#[post("/share/invite")]
pub async fn create_invite(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    payload: web::Json<CreateInviteRequest>,
) -> ApiResult<web::Json<ShareInvite>> {
    let CreateInviteRequest {
        baby_id,
        invitee_email,
    } = payload.into_inner();
    Ok(web::Json(
        state.sharing.invite(&caller, baby_id, invitee_email).await?,
    ))
}

/// Pending invites addressed to the caller's email.
#[utoipa::path(
    get,
    path = "/api/share/invites/pending",
    responses(
        (status = 200, description = "Pending invites", body = [PendingInvite]),
        (status = 401, description = "Not authenticated", body = Error)
    ),
    tags = ["sharing"],
    operation_id = "listPendingInvites"
)]
#[get("/share/invites/pending")]
pub async fn pending_invites(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<PendingInvite>>> {
    Ok(web::Json(state.sharing.pending_for(&caller).await?))
}

/// Accept an invite and join the baby's collaborators.
#[utoipa::path(
    post,
    path = "/api/share/invite/{invite_id}/accept",
    params(("invite_id" = String, Path, description = "Invite identifier")),
    responses(
        (status = 200, description = "Invite accepted", body = MessageResponse),
        (status = 400, description = "Invite already processed", body = Error),
        (status = 403, description = "Invite is for someone else", body = Error),
        (status = 404, description = "Unknown invite", body = Error)
    ),
    tags = ["sharing"],
    operation_id = "acceptInvite"
)]
#[post("/share/invite/{invite_id}/accept")]
pub async fn accept_invite(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<InviteId>,
) -> ApiResult<web::Json<MessageResponse>> {
    state.sharing.accept(&caller, &path).await?;
    Ok(web::Json(MessageResponse::new("Invite accepted")))
}

/// Decline an invite.
#[utoipa::path(
    post,
    path = "/api/share/invite/{invite_id}/decline",
    params(("invite_id" = String, Path, description = "Invite identifier")),
    responses(
        (status = 200, description = "Invite declined", body = MessageResponse),
        (status = 400, description = "Invite already processed", body = Error),
        (status = 403, description = "Invite is for someone else", body = Error),
        (status = 404, description = "Unknown invite", body = Error)
    ),
    tags = ["sharing"],
    operation_id = "declineInvite"
)]
#[post("/share/invite/{invite_id}/decline")]
pub async fn decline_invite(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<InviteId>,
) -> ApiResult<web::Json<MessageResponse>> {
    state.sharing.decline(&caller, &path).await?;
    Ok(web::Json(MessageResponse::new("Invite declined")))
}

/// Remove a collaborator. Succeeds even when the user was not a member.
#[utoipa::path(
    delete,
    path = "/api/share/{baby_id}/{user_id}",
    params(
        ("baby_id" = String, Path, description = "Baby identifier"),
        ("user_id" = String, Path, description = "Collaborator to remove")
    ),
    responses(
        (status = 200, description = "Access removed", body = MessageResponse),
        (status = 403, description = "Caller is not the owner", body = Error),
        (status = 404, description = "Unknown baby", body = Error)
    ),
    tags = ["sharing"],
    operation_id = "revokeAccess"
)]
#[delete("/share/{baby_id}/{user_id}")]
pub async fn revoke_access(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<(BabyId, UserId)>,
) -> ApiResult<web::Json<MessageResponse>> {
    let (baby_id, member) = path.into_inner();
    state.sharing.revoke(&caller, &baby_id, &member).await?;
    Ok(web::Json(MessageResponse::new("Access removed")))
}

#[cfg(test)]
#[path = "sharing_tests.rs"]
mod tests;
