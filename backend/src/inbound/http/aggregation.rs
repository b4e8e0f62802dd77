//! Derived views: timeline, daily statistics, and the nap forecast.

use actix_web::{get, web};

use crate::domain::{BabyId, DailyStats, Error, SleepPrediction, TimelineEntry};
use crate::inbound::http::ApiResult;
use crate::inbound::http::activities_dto::DayQuery;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

/// Feedings, sleeps, and diaper changes for one UTC day, newest first.
#[utoipa::path(
    get,
    path = "/api/timeline/{baby_id}",
    params(("baby_id" = String, Path, description = "Baby identifier"), DayQuery),
    responses(
        (status = 200, description = "Merged timeline", body = [TimelineEntry]),
        (status = 400, description = "Invalid date", body = Error),
        (status = 403, description = "No access", body = Error)
    ),
    tags = ["aggregation"],
    operation_id = "getTimeline"
)]
#[get("/timeline/{baby_id}")]
pub async fn timeline(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<BabyId>,
    query: web::Query<DayQuery>,
) -> ApiResult<web::Json<Vec<TimelineEntry>>> {
    let entries = state
        .aggregation
        .timeline(&caller, path.into_inner(), query.date.as_deref())
        .await?;
    Ok(web::Json(entries))
}

/// Totals for one day, today by default.
#[utoipa::path(
    get,
    path = "/api/stats/{baby_id}",
    params(("baby_id" = String, Path, description = "Baby identifier"), DayQuery),
    responses(
        (status = 200, description = "Daily totals", body = DailyStats),
        (status = 400, description = "Invalid date", body = Error),
        (status = 403, description = "No access", body = Error)
    ),
    tags = ["aggregation"],
    operation_id = "getDailyStats"
)]
#[get("/stats/{baby_id}")]
pub async fn daily_stats(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<BabyId>,
    query: web::Query<DayQuery>,
) -> ApiResult<web::Json<DailyStats>> {
    let stats = state
        .aggregation
        .daily_stats(&caller, path.into_inner(), query.date.as_deref())
        .await?;
    Ok(web::Json(stats))
}

/// Next nap estimate from age and the last week of sleep.
#[utoipa::path(
    get,
    path = "/api/sleep/prediction/{baby_id}",
    params(("baby_id" = String, Path, description = "Baby identifier")),
    responses(
        (status = 200, description = "Next nap estimate", body = SleepPrediction),
        (status = 403, description = "No access", body = Error)
    ),
    tags = ["sleep"],
    operation_id = "predictNextNap"
)]
#[get("/sleep/prediction/{baby_id}")]
pub async fn sleep_prediction(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<BabyId>,
) -> ApiResult<web::Json<SleepPrediction>> {
    Ok(web::Json(
        state.prediction.predict(&caller, path.into_inner()).await?,
    ))
}

#[cfg(test)]
#[path = "aggregation_tests.rs"]
mod tests;
