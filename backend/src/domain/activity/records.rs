//! Care records logged against a baby.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BabyId, RecordId, UserId};

/// Record families that can be listed and deleted by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Feeding,
    Sleep,
    Diaper,
    Growth,
}

impl ActivityKind {
    /// Lowercase name used in messages and logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Feeding => "feeding",
            Self::Sleep => "sleep",
            Self::Diaper => "diaper",
            Self::Growth => "growth",
        }
    }
}

/// How a feeding was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FeedingType {
    BreastLeft,
    BreastRight,
    Bottle,
    Solid,
}

/// Stored feeding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeedingRecord {
    pub record_id: RecordId,
    pub baby_id: BabyId,
    /// Author of the record.
    pub user_id: UserId,
    pub feeding_type: FeedingType,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_ml: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Nap or night sleep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SleepType {
    Nap,
    Night,
}

/// Carer's rating of a sleep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SleepQuality {
    Good,
    Fair,
    Poor,
}

/// Stored sleep; `end_time` is absent while ongoing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SleepRecord {
    pub record_id: RecordId,
    pub baby_id: BabyId,
    pub user_id: UserId,
    pub sleep_type: SleepType,
    pub start_time: DateTime<Utc>,
    /// Absent while the baby is still asleep.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<SleepQuality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SleepRecord {
    /// Apply an end-of-sleep update. Absent fields keep their stored value.
    pub fn apply(&mut self, patch: &SleepPatch) {
        if let Some(end_time) = patch.end_time {
            self.end_time = Some(end_time);
        }
        if let Some(duration) = patch.duration_minutes {
            self.duration_minutes = Some(duration);
        }
        if let Some(quality) = patch.quality {
            self.quality = Some(quality);
        }
        if let Some(notes) = &patch.notes {
            self.notes = Some(notes.clone());
        }
    }
}

/// Fields a caller may change on an existing sleep record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SleepPatch {
    pub end_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<u32>,
    pub quality: Option<SleepQuality>,
    pub notes: Option<String>,
}

impl SleepPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.end_time.is_none()
            && self.duration_minutes.is_none()
            && self.quality.is_none()
            && self.notes.is_none()
    }
}

/// Diaper contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DiaperType {
    Wet,
    Dirty,
    Mixed,
}

/// Stored diaper change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DiaperRecord {
    pub record_id: RecordId,
    pub baby_id: BabyId,
    pub user_id: UserId,
    pub diaper_type: DiaperType,
    pub time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Stored growth measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GrowthRecord {
    pub record_id: RecordId,
    pub baby_id: BabyId,
    pub user_id: UserId,
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_circumference_cm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated feeding input; ids and timestamps are assigned on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedingDraft {
    pub feeding_type: FeedingType,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<u32>,
    pub amount_ml: Option<u32>,
    pub food_type: Option<String>,
    pub notes: Option<String>,
}

/// Caller-supplied sleep fields.
#[derive(Debug, Clone, PartialEq)]
pub struct SleepDraft {
    pub sleep_type: SleepType,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<u32>,
    pub quality: Option<SleepQuality>,
    pub notes: Option<String>,
}

/// Caller-supplied diaper fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DiaperDraft {
    pub diaper_type: DiaperType,
    pub time: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Caller-supplied growth fields.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthDraft {
    pub date: NaiveDate,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub head_circumference_cm: Option<f64>,
    pub notes: Option<String>,
}

/// Identity and provenance shared by every freshly created record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RecordStamp {
    pub record_id: RecordId,
    pub baby_id: BabyId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl FeedingDraft {
    pub(crate) fn into_record(self, stamp: RecordStamp) -> FeedingRecord {
        FeedingRecord {
            record_id: stamp.record_id,
            baby_id: stamp.baby_id,
            user_id: stamp.user_id,
            feeding_type: self.feeding_type,
            start_time: self.start_time,
            end_time: self.end_time,
            duration_minutes: self.duration_minutes,
            amount_ml: self.amount_ml,
            food_type: self.food_type,
            notes: self.notes,
            created_at: stamp.created_at,
        }
    }
}

impl SleepDraft {
    pub(crate) fn into_record(self, stamp: RecordStamp) -> SleepRecord {
        SleepRecord {
            record_id: stamp.record_id,
            baby_id: stamp.baby_id,
            user_id: stamp.user_id,
            sleep_type: self.sleep_type,
            start_time: self.start_time,
            end_time: self.end_time,
            duration_minutes: self.duration_minutes,
            quality: self.quality,
            notes: self.notes,
            created_at: stamp.created_at,
        }
    }
}

impl DiaperDraft {
    pub(crate) fn into_record(self, stamp: RecordStamp) -> DiaperRecord {
        DiaperRecord {
            record_id: stamp.record_id,
            baby_id: stamp.baby_id,
            user_id: stamp.user_id,
            diaper_type: self.diaper_type,
            time: self.time,
            notes: self.notes,
            created_at: stamp.created_at,
        }
    }
}

impl GrowthDraft {
    pub(crate) fn into_record(self, stamp: RecordStamp) -> GrowthRecord {
        GrowthRecord {
            record_id: stamp.record_id,
            baby_id: stamp.baby_id,
            user_id: stamp.user_id,
            date: self.date,
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            head_circumference_cm: self.head_circumference_cm,
            notes: self.notes,
            created_at: stamp.created_at,
        }
    }
}
