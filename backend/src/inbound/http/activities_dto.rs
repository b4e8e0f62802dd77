//! Request bodies for the activity endpoints.
//!
//! Timestamps arrive as strings and go through the shared parser so every
//! endpoint accepts the same formats and reports the offending field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    BabyId, DiaperDraft, DiaperType, Error, FeedingDraft, FeedingType, GrowthDraft, SleepDraft,
    SleepPatch, SleepQuality, SleepType, parse_date_field, parse_timestamp_field,
};

/// Optional `?date=YYYY-MM-DD` filter; today (UTC) when omitted on
/// aggregate views, unbounded on plain lists.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DayQuery {
    #[param(example = "2024-09-03")]
    pub date: Option<String>,
}

fn optional_timestamp(field: &str, raw: Option<&str>) -> Result<Option<DateTime<Utc>>, Error> {
    raw.map(|value| parse_timestamp_field(field, value)).transpose()
}

/// Body of `POST /api/feeding`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateFeedingRequest {
    pub baby_id: BabyId,
    pub feeding_type: FeedingType,
    #[schema(example = "2024-09-03T07:30:00Z")]
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub amount_ml: Option<u32>,
    #[serde(default)]
    pub food_type: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateFeedingRequest {
    /// Validate timestamps and split off the target baby.
    pub fn into_parts(self) -> Result<(BabyId, FeedingDraft), Error> {
        let draft = FeedingDraft {
            feeding_type: self.feeding_type,
            start_time: parse_timestamp_field("start_time", &self.start_time)?,
            end_time: optional_timestamp("end_time", self.end_time.as_deref())?,
            duration_minutes: self.duration_minutes,
            amount_ml: self.amount_ml,
            food_type: self.food_type,
            notes: self.notes,
        };
        Ok((self.baby_id, draft))
    }
}

/// Body of `POST /api/sleep`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateSleepRequest {
    pub baby_id: BabyId,
    pub sleep_type: SleepType,
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub quality: Option<SleepQuality>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateSleepRequest {
    /// Validate timestamps and split off the target baby.
    pub fn into_parts(self) -> Result<(BabyId, SleepDraft), Error> {
        let draft = SleepDraft {
            sleep_type: self.sleep_type,
            start_time: parse_timestamp_field("start_time", &self.start_time)?,
            end_time: optional_timestamp("end_time", self.end_time.as_deref())?,
            duration_minutes: self.duration_minutes,
            quality: self.quality,
            notes: self.notes,
        };
        Ok((self.baby_id, draft))
    }
}

/// Closing or annotating an existing sleep; omitted fields are untouched.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateSleepRequest {
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub quality: Option<SleepQuality>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TryFrom<UpdateSleepRequest> for SleepPatch {
    type Error = Error;

    fn try_from(value: UpdateSleepRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            end_time: optional_timestamp("end_time", value.end_time.as_deref())?,
            duration_minutes: value.duration_minutes,
            quality: value.quality,
            notes: value.notes,
        })
    }
}

/// Body of `POST /api/diaper`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateDiaperRequest {
    pub baby_id: BabyId,
    pub diaper_type: DiaperType,
    pub time: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateDiaperRequest {
    /// Validate the change time and split off the target baby.
    pub fn into_parts(self) -> Result<(BabyId, DiaperDraft), Error> {
        let draft = DiaperDraft {
            diaper_type: self.diaper_type,
            time: parse_timestamp_field("time", &self.time)?,
            notes: self.notes,
        };
        Ok((self.baby_id, draft))
    }
}

/// Body of `POST /api/growth`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateGrowthRequest {
    pub baby_id: BabyId,
    #[schema(example = "2024-09-03")]
    pub date: String,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub head_circumference_cm: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateGrowthRequest {
    /// Validate the date and split off the target baby.
    pub fn into_parts(self) -> Result<(BabyId, GrowthDraft), Error> {
        let draft = GrowthDraft {
            date: parse_date_field("date", &self.date)?,
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            head_circumference_cm: self.head_circumference_cm,
            notes: self.notes,
        };
        Ok((self.baby_id, draft))
    }
}
