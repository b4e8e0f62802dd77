//! In-memory document store implementing every storage port.
//!
//! All collections sit behind one lock, so operations touching several
//! documents (cascading deletes, invite acceptance) are atomic to readers.
//! Nothing is persisted across restarts.

mod activities;
mod babies;
mod reminders;
mod sessions;
mod sharing;
mod users;

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use crate::domain::ports::{RecordQuery, StoreError, growth_anchor};
use crate::domain::{
    Baby, BabyId, DiaperRecord, FeedingRecord, GrowthRecord, InviteId, RecordId, Reminder,
    ReminderId, Session, ShareInvite, SleepRecord, User, UserId,
};

#[derive(Default)]
struct Collections {
    users: HashMap<UserId, User>,
    /// Keyed by the exposed token value.
    sessions: HashMap<String, Session>,
    babies: HashMap<BabyId, Baby>,
    feedings: HashMap<RecordId, FeedingRecord>,
    sleeps: HashMap<RecordId, SleepRecord>,
    diapers: HashMap<RecordId, DiaperRecord>,
    growth: HashMap<RecordId, GrowthRecord>,
    invites: HashMap<InviteId, ShareInvite>,
    reminders: HashMap<ReminderId, Reminder>,
}

/// Process-local document store.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, StoreError> {
        self.collections
            .read()
            .map_err(|_| StoreError::connection("store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, StoreError> {
        self.collections
            .write()
            .map_err(|_| StoreError::connection("store lock poisoned"))
    }
}

/// Placement of a record on the time axis.
trait Anchored {
    fn record_id(&self) -> RecordId;
    fn baby_id(&self) -> BabyId;
    fn anchor(&self) -> DateTime<Utc>;
}

impl Anchored for FeedingRecord {
    fn record_id(&self) -> RecordId {
        self.record_id
    }
    fn baby_id(&self) -> BabyId {
        self.baby_id
    }
    fn anchor(&self) -> DateTime<Utc> {
        self.start_time
    }
}

impl Anchored for SleepRecord {
    fn record_id(&self) -> RecordId {
        self.record_id
    }
    fn baby_id(&self) -> BabyId {
        self.baby_id
    }
    fn anchor(&self) -> DateTime<Utc> {
        self.start_time
    }
}

impl Anchored for DiaperRecord {
    fn record_id(&self) -> RecordId {
        self.record_id
    }
    fn baby_id(&self) -> BabyId {
        self.baby_id
    }
    fn anchor(&self) -> DateTime<Utc> {
        self.time
    }
}

impl Anchored for GrowthRecord {
    fn record_id(&self) -> RecordId {
        self.record_id
    }
    fn baby_id(&self) -> BabyId {
        self.baby_id
    }
    fn anchor(&self) -> DateTime<Utc> {
        growth_anchor(self)
    }
}

/// Records matching `query`, newest anchor first, ties by id ascending.
fn select<T: Anchored + Clone>(records: &HashMap<RecordId, T>, query: &RecordQuery) -> Vec<T> {
    let mut matches: Vec<&T> = records
        .values()
        .filter(|record| record.baby_id() == query.baby_id && query.admits(record.anchor()))
        .collect();
    matches.sort_by(|a, b| {
        b.anchor()
            .cmp(&a.anchor())
            .then_with(|| a.record_id().cmp(&b.record_id()))
    });
    matches.into_iter().take(query.limit).cloned().collect()
}

/// Remove every record scoped to `baby_id`, returning how many went.
fn purge<T: Anchored>(records: &mut HashMap<RecordId, T>, baby_id: BabyId) -> usize {
    let before = records.len();
    records.retain(|_, record| record.baby_id() != baby_id);
    before - records.len()
}
