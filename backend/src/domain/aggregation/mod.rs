//! Day-scoped views over care records: a merged timeline and summary stats.
//!
//! Both views are pure functions of the records fetched for one
//! [`DayWindow`](crate::domain::DayWindow); the service only gathers inputs.

mod service;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{
    DiaperRecord, DiaperType, FeedingRecord, FeedingType, RecordId, SleepRecord, UserId,
};

pub use service::AggregationService;

/// Record kind behind a timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TimelineEntryType {
    Feeding,
    Sleep,
    Diaper,
}

/// Full record carried by a timeline entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum TimelineData {
    Feeding(FeedingRecord),
    Sleep(SleepRecord),
    Diaper(DiaperRecord),
}

/// Uniform envelope for one record on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TimelineEntry {
    pub entry_id: RecordId,
    pub entry_type: TimelineEntryType,
    pub time: DateTime<Utc>,
    pub data: TimelineData,
    pub created_by: UserId,
}

impl From<FeedingRecord> for TimelineEntry {
    fn from(record: FeedingRecord) -> Self {
        Self {
            entry_id: record.record_id,
            entry_type: TimelineEntryType::Feeding,
            time: record.start_time,
            created_by: record.user_id,
            data: TimelineData::Feeding(record),
        }
    }
}

impl From<SleepRecord> for TimelineEntry {
    fn from(record: SleepRecord) -> Self {
        Self {
            entry_id: record.record_id,
            entry_type: TimelineEntryType::Sleep,
            time: record.start_time,
            created_by: record.user_id,
            data: TimelineData::Sleep(record),
        }
    }
}

impl From<DiaperRecord> for TimelineEntry {
    fn from(record: DiaperRecord) -> Self {
        Self {
            entry_id: record.record_id,
            entry_type: TimelineEntryType::Diaper,
            time: record.time,
            created_by: record.user_id,
            data: TimelineData::Diaper(record),
        }
    }
}

/// Merge one day's records into a single list, newest first.
///
/// Entries sharing a timestamp are ordered by `entry_id` ascending so the
/// result is deterministic. Growth measurements never appear here.
pub fn build_timeline(
    feedings: Vec<FeedingRecord>,
    sleeps: Vec<SleepRecord>,
    diapers: Vec<DiaperRecord>,
) -> Vec<TimelineEntry> {
    let mut entries: Vec<TimelineEntry> = feedings
        .into_iter()
        .map(TimelineEntry::from)
        .chain(sleeps.into_iter().map(TimelineEntry::from))
        .chain(diapers.into_iter().map(TimelineEntry::from))
        .collect();
    entries.sort_by(|a, b| b.time.cmp(&a.time).then_with(|| a.entry_id.cmp(&b.entry_id)));
    entries
}

/// Feeding totals for a day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FeedingStats {
    pub count: usize,
    pub total_minutes: u64,
    pub total_bottle_ml: u64,
}

/// Sleep totals for a day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SleepStats {
    pub count: usize,
    pub total_minutes: u64,
    /// `total_minutes / 60`, rounded to one decimal place.
    pub total_hours: f64,
}

/// Diaper counts for a day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DiaperStats {
    pub total: usize,
    pub wet: usize,
    pub dirty: usize,
    pub mixed: usize,
}

/// Totals for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyStats {
    /// Start of the summarized day.
    pub date: DateTime<Utc>,
    pub feeding: FeedingStats,
    pub sleep: SleepStats,
    pub diaper: DiaperStats,
}

/// Summarize one day's records.
///
/// Records without a duration count towards `count` but add nothing to the
/// minute totals. Only bottle feedings contribute to `total_bottle_ml`.
pub fn summarize_day(
    day_start: DateTime<Utc>,
    feedings: &[FeedingRecord],
    sleeps: &[SleepRecord],
    diapers: &[DiaperRecord],
) -> DailyStats {
    let feeding = FeedingStats {
        count: feedings.len(),
        total_minutes: feedings
            .iter()
            .filter_map(|f| f.duration_minutes)
            .map(u64::from)
            .sum(),
        total_bottle_ml: feedings
            .iter()
            .filter(|f| f.feeding_type == FeedingType::Bottle)
            .filter_map(|f| f.amount_ml)
            .map(u64::from)
            .sum(),
    };

    let sleep_minutes: u64 = sleeps
        .iter()
        .filter_map(|s| s.duration_minutes)
        .map(u64::from)
        .sum();
    let sleep = SleepStats {
        count: sleeps.len(),
        total_minutes: sleep_minutes,
        total_hours: hours_to_one_decimal(sleep_minutes),
    };

    let count_of = |kind: DiaperType| diapers.iter().filter(|d| d.diaper_type == kind).count();
    let diaper = DiaperStats {
        total: diapers.len(),
        wet: count_of(DiaperType::Wet),
        dirty: count_of(DiaperType::Dirty),
        mixed: count_of(DiaperType::Mixed),
    };

    DailyStats {
        date: day_start,
        feeding,
        sleep,
        diaper,
    }
}

/// Hours rounded to one decimal from the exact binary quotient, ties to even.
///
/// `0.25` rounds to `0.2` while `0.15`, stored just below the tie, rounds to
/// `0.1`.
fn hours_to_one_decimal(minutes: u64) -> f64 {
    let exact_minutes = u32::try_from(minutes).map_or(f64::from(u32::MAX), f64::from);
    format!("{:.1}", exact_minutes / 60.0)
        .parse()
        .unwrap_or_default()
}
