//! Record collections: feedings, sleeps, diapers, and growth.

use std::collections::HashMap;

use async_trait::async_trait;

use super::{Anchored, Collections, MemoryStore, select};
use crate::domain::ports::{ActivityRepository, RecordQuery, StoreError};
use crate::domain::{
    ActivityKind, BabyId, DiaperRecord, FeedingRecord, GrowthRecord, RecordId, SleepPatch,
    SleepRecord,
};

fn insert_new<T: Anchored + Clone>(
    records: &mut HashMap<RecordId, T>,
    record: &T,
) -> Result<(), StoreError> {
    if records.contains_key(&record.record_id()) {
        return Err(StoreError::conflict("record id already exists"));
    }
    records.insert(record.record_id(), record.clone());
    Ok(())
}

impl Collections {
    fn baby_of(&self, kind: ActivityKind, id: &RecordId) -> Option<BabyId> {
        match kind {
            ActivityKind::Feeding => self.feedings.get(id).map(Anchored::baby_id),
            ActivityKind::Sleep => self.sleeps.get(id).map(Anchored::baby_id),
            ActivityKind::Diaper => self.diapers.get(id).map(Anchored::baby_id),
            ActivityKind::Growth => self.growth.get(id).map(Anchored::baby_id),
        }
    }

    fn remove_record(&mut self, kind: ActivityKind, id: &RecordId) -> bool {
        match kind {
            ActivityKind::Feeding => self.feedings.remove(id).is_some(),
            ActivityKind::Sleep => self.sleeps.remove(id).is_some(),
            ActivityKind::Diaper => self.diapers.remove(id).is_some(),
            ActivityKind::Growth => self.growth.remove(id).is_some(),
        }
    }
}

#[async_trait]
impl ActivityRepository for MemoryStore {
    async fn insert_feeding(&self, record: &FeedingRecord) -> Result<(), StoreError> {
        insert_new(&mut self.write()?.feedings, record)
    }

    async fn insert_sleep(&self, record: &SleepRecord) -> Result<(), StoreError> {
        insert_new(&mut self.write()?.sleeps, record)
    }

    async fn insert_diaper(&self, record: &DiaperRecord) -> Result<(), StoreError> {
        insert_new(&mut self.write()?.diapers, record)
    }

    async fn insert_growth(&self, record: &GrowthRecord) -> Result<(), StoreError> {
        insert_new(&mut self.write()?.growth, record)
    }

    async fn list_feedings(&self, query: &RecordQuery) -> Result<Vec<FeedingRecord>, StoreError> {
        Ok(select(&self.read()?.feedings, query))
    }

    async fn list_sleeps(&self, query: &RecordQuery) -> Result<Vec<SleepRecord>, StoreError> {
        Ok(select(&self.read()?.sleeps, query))
    }

    async fn list_diapers(&self, query: &RecordQuery) -> Result<Vec<DiaperRecord>, StoreError> {
        Ok(select(&self.read()?.diapers, query))
    }

    async fn list_growth(&self, query: &RecordQuery) -> Result<Vec<GrowthRecord>, StoreError> {
        Ok(select(&self.read()?.growth, query))
    }

    async fn find_owner_baby(
        &self,
        kind: ActivityKind,
        id: &RecordId,
    ) -> Result<Option<BabyId>, StoreError> {
        Ok(self.read()?.baby_of(kind, id))
    }

    async fn find_sleep(&self, id: &RecordId) -> Result<Option<SleepRecord>, StoreError> {
        Ok(self.read()?.sleeps.get(id).cloned())
    }

    async fn update_sleep(
        &self,
        id: &RecordId,
        patch: &SleepPatch,
    ) -> Result<Option<SleepRecord>, StoreError> {
        let mut collections = self.write()?;
        Ok(collections.sleeps.get_mut(id).map(|record| {
            record.apply(patch);
            record.clone()
        }))
    }

    async fn delete_record(&self, kind: ActivityKind, id: &RecordId) -> Result<bool, StoreError> {
        Ok(self.write()?.remove_record(kind, id))
    }
}
