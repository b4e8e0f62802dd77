//! Baby profile handlers.
//!
//! ```text
//! POST   /api/baby            {"name":"Ada","birth_date":"2024-03-01"}
//! GET    /api/baby
//! GET    /api/baby/{baby_id}
//! PUT    /api/baby/{baby_id}  {"name":"Ada Grace"}
//! DELETE /api/baby/{baby_id}
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Baby, BabyDraft, BabyId, BabyPatch, Error, Gender, parse_date_field};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::messages::MessageResponse;
use crate::inbound::http::state::HttpState;

/// Body of `POST /api/baby`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateBabyRequest {
    #[schema(example = "Ada")]
    pub name: String,
    #[schema(example = "2024-03-01")]
    pub birth_date: String,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub photo: Option<String>,
}

impl TryFrom<CreateBabyRequest> for BabyDraft {
    type Error = Error;

    fn try_from(value: CreateBabyRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: value.name,
            birth_date: parse_date_field("birth_date", &value.birth_date)?,
            gender: value.gender,
            photo: value.photo,
        })
    }
}

/// Partial profile update; omitted fields keep their value.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateBabyRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub photo: Option<String>,
}

impl TryFrom<UpdateBabyRequest> for BabyPatch {
    type Error = Error;

    fn try_from(value: UpdateBabyRequest) -> Result<Self, Self::Error> {
        let birth_date = value
            .birth_date
            .as_deref()
            .map(|raw| parse_date_field("birth_date", raw))
            .transpose()?;
        Ok(Self {
            name: value.name,
            birth_date,
            gender: value.gender,
            photo: value.photo,
        })
    }
}

/// Create a profile owned by the caller.
#[utoipa::path(
    post,
    path = "/api/baby",
    request_body = CreateBabyRequest,
    responses(
        (status = 200, description = "Profile created", body = Baby),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not authenticated", body = Error)
    ),
    tags = ["babies"],
    operation_id = "createBaby"
)]
#[post("/baby")]
pub async fn create_baby(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    payload: web::Json<CreateBabyRequest>,
) -> ApiResult<web::Json<Baby>> {
    let draft = BabyDraft::try_from(payload.into_inner())?;
    let baby = state.babies.create(&caller, draft).await?;
    Ok(web::Json(baby))
}

/// Profiles the caller owns or collaborates on.
#[utoipa::path(
    get,
    path = "/api/baby",
    responses(
        (status = 200, description = "Accessible profiles", body = [Baby]),
        (status = 401, description = "Not authenticated", body = Error)
    ),
    tags = ["babies"],
    operation_id = "listBabies"
)]
#[get("/baby")]
pub async fn list_babies(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<Baby>>> {
    Ok(web::Json(state.babies.list(&caller).await?))
}

/// One profile.
#[utoipa::path(
    get,
    path = "/api/baby/{baby_id}",
    params(("baby_id" = String, Path, description = "Baby identifier")),
    responses(
        (status = 200, description = "Profile", body = Baby),
        (status = 401, description = "Not authenticated", body = Error),
        (status = 403, description = "No access", body = Error)
    ),
    tags = ["babies"],
    operation_id = "getBaby"
)]
#[get("/baby/{baby_id}")]
pub async fn get_baby(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<BabyId>,
) -> ApiResult<web::Json<Baby>> {
    Ok(web::Json(state.babies.get(&caller, &path).await?))
}

/// Partially update a profile.
#[utoipa::path(
    put,
    path = "/api/baby/{baby_id}",
    params(("baby_id" = String, Path, description = "Baby identifier")),
    request_body = UpdateBabyRequest,
    responses(
        (status = 200, description = "Updated profile", body = Baby),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "No access", body = Error),
        (status = 404, description = "Profile removed concurrently", body = Error)
    ),
    tags = ["babies"],
    operation_id = "updateBaby"
)]
#[put("/baby/{baby_id}")]
pub async fn update_baby(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<BabyId>,
    payload: web::Json<UpdateBabyRequest>,
) -> ApiResult<web::Json<Baby>> {
    let patch = BabyPatch::try_from(payload.into_inner())?;
    Ok(web::Json(state.babies.update(&caller, &path, patch).await?))
}

/// Delete a profile and every record scoped to it. Owner only.
#[utoipa::path(
    delete,
    path = "/api/baby/{baby_id}",
    params(("baby_id" = String, Path, description = "Baby identifier")),
    responses(
        (status = 200, description = "Profile deleted", body = MessageResponse),
        (status = 403, description = "Caller is not the owner", body = Error),
        (status = 404, description = "Unknown profile", body = Error)
    ),
    tags = ["babies"],
    operation_id = "deleteBaby"
)]
#[delete("/baby/{baby_id}")]
pub async fn delete_baby(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<BabyId>,
) -> ApiResult<web::Json<MessageResponse>> {
    state.babies.delete(&caller, &path).await?;
    Ok(web::Json(MessageResponse::new("Baby profile deleted")))
}

#[cfg(test)]
#[path = "babies_tests.rs"]
mod tests;
