//! Reminder handlers.

use actix_web::{delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    BabyId, Error, Reminder, ReminderDraft, ReminderId, ReminderType, parse_timestamp_field,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::messages::MessageResponse;
use crate::inbound::http::state::HttpState;

/// Body of `POST /api/reminder`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateReminderRequest {
    pub baby_id: BabyId,
    pub reminder_type: ReminderType,
    #[schema(example = "2024-09-03T15:00:00Z")]
    pub time: String,
    pub message: String,
}

impl TryFrom<CreateReminderRequest> for ReminderDraft {
    type Error = Error;

    fn try_from(value: CreateReminderRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            baby_id: value.baby_id,
            reminder_type: value.reminder_type,
            time: parse_timestamp_field("time", &value.time)?,
            message: value.message,
        })
    }
}

/// Create an active reminder.
#[utoipa::path(
    post,
    path = "/api/reminder",
    request_body = CreateReminderRequest,
    responses(
        (status = 200, description = "Reminder created", body = Reminder),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "No access to the baby", body = Error)
    ),
    tags = ["reminders"],
    operation_id = "createReminder"
)]
#[post("/reminder")]
pub async fn create_reminder(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    payload: web::Json<CreateReminderRequest>,
) -> ApiResult<web::Json<Reminder>> {
    let draft = ReminderDraft::try_from(payload.into_inner())?;
    Ok(web::Json(state.reminders.create(&caller, draft).await?))
}

/// Active reminders, soonest first.
#[utoipa::path(
    get,
    path = "/api/reminder/{baby_id}",
    params(("baby_id" = String, Path, description = "Baby identifier")),
    responses(
        (status = 200, description = "Active reminders", body = [Reminder]),
        (status = 403, description = "No access", body = Error)
    ),
    tags = ["reminders"],
    operation_id = "listReminders"
)]
#[get("/reminder/{baby_id}")]
pub async fn list_reminders(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<BabyId>,
) -> ApiResult<web::Json<Vec<Reminder>>> {
    Ok(web::Json(state.reminders.list_active(&caller, &path).await?))
}

/// Delete a reminder the caller can access.
#[utoipa::path(
    delete,
    path = "/api/reminder/{reminder_id}",
    params(("reminder_id" = String, Path, description = "Reminder identifier")),
    responses(
        (status = 200, description = "Reminder deleted", body = MessageResponse),
        (status = 403, description = "No access", body = Error),
        (status = 404, description = "Unknown reminder", body = Error)
    ),
    tags = ["reminders"],
    operation_id = "deleteReminder"
)]
#[delete("/reminder/{reminder_id}")]
pub async fn delete_reminder(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<ReminderId>,
) -> ApiResult<web::Json<MessageResponse>> {
    state.reminders.delete(&caller, &path).await?;
    Ok(web::Json(MessageResponse::new("Reminder deleted")))
}

#[cfg(test)]
#[path = "reminders_tests.rs"]
mod tests;
