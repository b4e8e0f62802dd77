//! Activity record handlers: feeding, sleep, diaper, and growth.
//!
//! ```text
//! POST   /api/feeding              GET /api/feeding/{baby_id}?date=   DELETE /api/feeding/{record_id}
//! POST   /api/sleep                GET /api/sleep/{baby_id}?date=     PUT|DELETE /api/sleep/{record_id}
//! POST   /api/diaper               GET /api/diaper/{baby_id}?date=    DELETE /api/diaper/{record_id}
//! POST   /api/growth               GET /api/growth/{baby_id}          DELETE /api/growth/{record_id}
//! ```

use actix_web::{delete, get, post, put, web};

use crate::domain::{
    ActivityKind, BabyId, DiaperRecord, Error, FeedingRecord, GrowthRecord, RecordId, SleepPatch,
    SleepRecord,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::activities_dto::{
    CreateDiaperRequest, CreateFeedingRequest, CreateGrowthRequest, CreateSleepRequest, DayQuery,
    UpdateSleepRequest,
};
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::messages::MessageResponse;
use crate::inbound::http::state::HttpState;

async fn delete_record(
    state: &HttpState,
    caller: &AuthenticatedUser,
    kind: ActivityKind,
    record_id: &RecordId,
) -> ApiResult<web::Json<MessageResponse>> {
    state.activities.delete(caller, kind, record_id).await?;
    Ok(web::Json(MessageResponse::new(format!(
        "{} record deleted",
        kind.label()
    ))))
}

/// Log a feeding.
#[utoipa::path(
    post,
    path = "/api/feeding",
    request_body = CreateFeedingRequest,
    responses(
        (status = 200, description = "Feeding logged", body = FeedingRecord),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "No access to the baby", body = Error)
    ),
    tags = ["feeding"],
    operation_id = "createFeeding"
)]
#[post("/feeding")]
pub async fn create_feeding(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    payload: web::Json<CreateFeedingRequest>,
) -> ApiResult<web::Json<FeedingRecord>> {
    let (baby_id, draft) = payload.into_inner().into_parts()?;
    Ok(web::Json(
        state.activities.log_feeding(&caller, baby_id, draft).await?,
    ))
}

/// Feedings, optionally for one day.
#[utoipa::path(
    get,
    path = "/api/feeding/{baby_id}",
    params(("baby_id" = String, Path, description = "Baby identifier"), DayQuery),
    responses(
        (status = 200, description = "Feedings, newest first", body = [FeedingRecord]),
        (status = 400, description = "Invalid date", body = Error),
        (status = 403, description = "No access", body = Error)
    ),
    tags = ["feeding"],
    operation_id = "listFeedings"
)]
#[get("/feeding/{baby_id}")]
pub async fn list_feedings(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<BabyId>,
    query: web::Query<DayQuery>,
) -> ApiResult<web::Json<Vec<FeedingRecord>>> {
    let records = state
        .activities
        .list_feedings(&caller, path.into_inner(), query.date.as_deref())
        .await?;
    Ok(web::Json(records))
}

/// Delete a feeding.
#[utoipa::path(
    delete,
    path = "/api/feeding/{record_id}",
    params(("record_id" = String, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 403, description = "No access", body = Error),
        (status = 404, description = "Unknown record", body = Error)
    ),
    tags = ["feeding"],
    operation_id = "deleteFeeding"
)]
#[delete("/feeding/{record_id}")]
pub async fn delete_feeding(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<RecordId>,
) -> ApiResult<web::Json<MessageResponse>> {
    delete_record(&state, &caller, ActivityKind::Feeding, &path).await
}

/// Log a sleep, open or finished.
#[utoipa::path(
    post,
    path = "/api/sleep",
    request_body = CreateSleepRequest,
    responses(
        (status = 200, description = "Sleep logged", body = SleepRecord),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "No access to the baby", body = Error)
    ),
    tags = ["sleep"],
    operation_id = "createSleep"
)]
#[post("/sleep")]
pub async fn create_sleep(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    payload: web::Json<CreateSleepRequest>,
) -> ApiResult<web::Json<SleepRecord>> {
    let (baby_id, draft) = payload.into_inner().into_parts()?;
    Ok(web::Json(
        state.activities.log_sleep(&caller, baby_id, draft).await?,
    ))
}

/// Sleeps, optionally for one day.
#[utoipa::path(
    get,
    path = "/api/sleep/{baby_id}",
    params(("baby_id" = String, Path, description = "Baby identifier"), DayQuery),
    responses(
        (status = 200, description = "Sleeps, newest first", body = [SleepRecord]),
        (status = 400, description = "Invalid date", body = Error),
        (status = 403, description = "No access", body = Error)
    ),
    tags = ["sleep"],
    operation_id = "listSleeps"
)]
#[get("/sleep/{baby_id}")]
pub async fn list_sleeps(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<BabyId>,
    query: web::Query<DayQuery>,
) -> ApiResult<web::Json<Vec<SleepRecord>>> {
    let records = state
        .activities
        .list_sleeps(&caller, path.into_inner(), query.date.as_deref())
        .await?;
    Ok(web::Json(records))
}

/// Close or annotate a sleep, typically to record when a nap ended.
#[utoipa::path(
    put,
    path = "/api/sleep/{record_id}",
    params(("record_id" = String, Path, description = "Record identifier")),
    request_body = UpdateSleepRequest,
    responses(
        (status = 200, description = "Updated sleep", body = SleepRecord),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "No access", body = Error),
        (status = 404, description = "Unknown record", body = Error)
    ),
    tags = ["sleep"],
    operation_id = "updateSleep"
)]
#[put("/sleep/{record_id}")]
pub async fn update_sleep(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<RecordId>,
    payload: web::Json<UpdateSleepRequest>,
) -> ApiResult<web::Json<SleepRecord>> {
    let patch = SleepPatch::try_from(payload.into_inner())?;
    Ok(web::Json(
        state.activities.update_sleep(&caller, &path, patch).await?,
    ))
}

/// Delete a sleep.
#[utoipa::path(
    delete,
    path = "/api/sleep/{record_id}",
    params(("record_id" = String, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 403, description = "No access", body = Error),
        (status = 404, description = "Unknown record", body = Error)
    ),
    tags = ["sleep"],
    operation_id = "deleteSleep"
)]
#[delete("/sleep/{record_id}")]
pub async fn delete_sleep(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<RecordId>,
) -> ApiResult<web::Json<MessageResponse>> {
    delete_record(&state, &caller, ActivityKind::Sleep, &path).await
}

/// Log a diaper change.
#[utoipa::path(
    post,
    path = "/api/diaper",
    request_body = CreateDiaperRequest,
    responses(
        (status = 200, description = "Change logged", body = DiaperRecord),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "No access to the baby", body = Error)
    ),
    tags = ["diaper"],
    operation_id = "createDiaper"
)]
#[post("/diaper")]
pub async fn create_diaper(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    payload: web::Json<CreateDiaperRequest>,
) -> ApiResult<web::Json<DiaperRecord>> {
    let (baby_id, draft) = payload.into_inner().into_parts()?;
    Ok(web::Json(
        state.activities.log_diaper(&caller, baby_id, draft).await?,
    ))
}

/// Diaper changes, optionally for one day.
#[utoipa::path(
    get,
    path = "/api/diaper/{baby_id}",
    params(("baby_id" = String, Path, description = "Baby identifier"), DayQuery),
    responses(
        (status = 200, description = "Changes, newest first", body = [DiaperRecord]),
        (status = 400, description = "Invalid date", body = Error),
        (status = 403, description = "No access", body = Error)
    ),
    tags = ["diaper"],
    operation_id = "listDiapers"
)]
#[get("/diaper/{baby_id}")]
pub async fn list_diapers(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<BabyId>,
    query: web::Query<DayQuery>,
) -> ApiResult<web::Json<Vec<DiaperRecord>>> {
    let records = state
        .activities
        .list_diapers(&caller, path.into_inner(), query.date.as_deref())
        .await?;
    Ok(web::Json(records))
}

/// Delete a diaper change.
#[utoipa::path(
    delete,
    path = "/api/diaper/{record_id}",
    params(("record_id" = String, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 403, description = "No access", body = Error),
        (status = 404, description = "Unknown record", body = Error)
    ),
    tags = ["diaper"],
    operation_id = "deleteDiaper"
)]
#[delete("/diaper/{record_id}")]
pub async fn delete_diaper(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<RecordId>,
) -> ApiResult<web::Json<MessageResponse>> {
    delete_record(&state, &caller, ActivityKind::Diaper, &path).await
}

/// Log a growth measurement.
#[utoipa::path(
    post,
    path = "/api/growth",
    request_body = CreateGrowthRequest,
    responses(
        (status = 200, description = "Measurement logged", body = GrowthRecord),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "No access to the baby", body = Error)
    ),
    tags = ["growth"],
    operation_id = "createGrowth"
)]
#[post("/growth")]
pub async fn create_growth(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    payload: web::Json<CreateGrowthRequest>,
) -> ApiResult<web::Json<GrowthRecord>> {
    let (baby_id, draft) = payload.into_inner().into_parts()?;
    Ok(web::Json(
        state.activities.log_growth(&caller, baby_id, draft).await?,
    ))
}

/// Growth measurements, latest first.
#[utoipa::path(
    get,
    path = "/api/growth/{baby_id}",
    params(("baby_id" = String, Path, description = "Baby identifier")),
    responses(
        (status = 200, description = "Measurements, newest first", body = [GrowthRecord]),
        (status = 403, description = "No access", body = Error)
    ),
    tags = ["growth"],
    operation_id = "listGrowth"
)]
#[get("/growth/{baby_id}")]
pub async fn list_growth(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<BabyId>,
) -> ApiResult<web::Json<Vec<GrowthRecord>>> {
    Ok(web::Json(
        state.activities.list_growth(&caller, path.into_inner()).await?,
    ))
}

/// Delete a growth measurement.
#[utoipa::path(
    delete,
    path = "/api/growth/{record_id}",
    params(("record_id" = String, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 403, description = "No access", body = Error),
        (status = 404, description = "Unknown record", body = Error)
    ),
    tags = ["growth"],
    operation_id = "deleteGrowth"
)]
#[delete("/growth/{record_id}")]
pub async fn delete_growth(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<RecordId>,
) -> ApiResult<web::Json<MessageResponse>> {
    delete_record(&state, &caller, ActivityKind::Growth, &path).await
}

#[cfg(test)]
#[path = "activities_tests.rs"]
mod tests;
