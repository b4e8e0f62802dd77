//! Port for care record storage.

use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, Utc};

use super::StoreError;
use crate::domain::{
    ActivityKind, BabyId, DayWindow, DiaperRecord, FeedingRecord, GrowthRecord, RecordId,
    SleepPatch, SleepRecord,
};

/// Filter for record lists: one baby, an optional anchor range, and a cap.
///
/// Adapters return matches ordered by anchor descending, most recent first,
/// with `record_id` ascending among equal anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordQuery {
    pub baby_id: BabyId,
    /// Inclusive lower bound on the anchor.
    pub from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on the anchor.
    pub until: Option<DateTime<Utc>>,
    pub limit: usize,
}

impl RecordQuery {
    /// Unbounded query for one baby.
    pub fn for_baby(baby_id: BabyId, limit: usize) -> Self {
        Self {
            baby_id,
            from: None,
            until: None,
            limit,
        }
    }

    /// Restrict to one day.
    #[must_use]
    pub fn within(mut self, window: DayWindow) -> Self {
        self.from = Some(window.start());
        self.until = Some(window.end());
        self
    }

    /// Restrict to anchors at or after `from`.
    #[must_use]
    pub fn since(mut self, from: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self
    }

    /// Whether an anchor falls inside the requested range.
    pub fn admits(&self, anchor: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| anchor >= from) && self.until.is_none_or(|until| anchor < until)
    }
}

/// Anchor instant of a growth measurement: midnight UTC of its date.
pub fn growth_anchor(record: &GrowthRecord) -> DateTime<Utc> {
    record.date.and_time(NaiveTime::MIN).and_utc()
}

/// Storage for the four care record collections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn insert_feeding(&self, record: &FeedingRecord) -> Result<(), StoreError>;
    async fn insert_sleep(&self, record: &SleepRecord) -> Result<(), StoreError>;
    async fn insert_diaper(&self, record: &DiaperRecord) -> Result<(), StoreError>;
    async fn insert_growth(&self, record: &GrowthRecord) -> Result<(), StoreError>;

    async fn list_feedings(&self, query: &RecordQuery) -> Result<Vec<FeedingRecord>, StoreError>;
    async fn list_sleeps(&self, query: &RecordQuery) -> Result<Vec<SleepRecord>, StoreError>;
    async fn list_diapers(&self, query: &RecordQuery) -> Result<Vec<DiaperRecord>, StoreError>;
    async fn list_growth(&self, query: &RecordQuery) -> Result<Vec<GrowthRecord>, StoreError>;

    /// Baby a record of `kind` belongs to, or `None` when it does not exist.
    async fn find_owner_baby(
        &self,
        kind: ActivityKind,
        id: &RecordId,
    ) -> Result<Option<BabyId>, StoreError>;

    /// Load one sleep record.
    async fn find_sleep(&self, id: &RecordId) -> Result<Option<SleepRecord>, StoreError>;

    /// Patch a sleep record in place. Returns `None` when it does not exist.
    async fn update_sleep(
        &self,
        id: &RecordId,
        patch: &SleepPatch,
    ) -> Result<Option<SleepRecord>, StoreError>;

    /// Delete a record, reporting whether it existed.
    async fn delete_record(&self, kind: ActivityKind, id: &RecordId) -> Result<bool, StoreError>;
}
