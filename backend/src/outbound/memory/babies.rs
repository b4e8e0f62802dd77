//! `babies` collection and the cascade over its child collections.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{MemoryStore, purge};
use crate::domain::ports::{BabyRepository, CascadeReport, StoreError};
use crate::domain::{Baby, BabyId, BabyPatch, UserId};

#[async_trait]
impl BabyRepository for MemoryStore {
    async fn insert(&self, baby: &Baby) -> Result<(), StoreError> {
        let mut collections = self.write()?;
        if collections.babies.contains_key(&baby.baby_id) {
            return Err(StoreError::conflict("baby id already exists"));
        }
        collections.babies.insert(baby.baby_id, baby.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &BabyId) -> Result<Option<Baby>, StoreError> {
        Ok(self.read()?.babies.get(id).cloned())
    }

    async fn list_accessible(&self, user: &UserId, limit: usize) -> Result<Vec<Baby>, StoreError> {
        let collections = self.read()?;
        let mut babies: Vec<Baby> = collections
            .babies
            .values()
            .filter(|baby| baby.access_tier(user).is_some())
            .cloned()
            .collect();
        babies.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.baby_id.cmp(&b.baby_id))
        });
        babies.truncate(limit);
        Ok(babies)
    }

    async fn update_profile(
        &self,
        id: &BabyId,
        patch: &BabyPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Baby>, StoreError> {
        let mut collections = self.write()?;
        Ok(collections.babies.get_mut(id).map(|baby| {
            baby.apply(patch.clone(), updated_at);
            baby.clone()
        }))
    }

    async fn remove_collaborator(
        &self,
        id: &BabyId,
        user: &UserId,
    ) -> Result<Option<bool>, StoreError> {
        let mut collections = self.write()?;
        Ok(collections
            .babies
            .get_mut(id)
            .map(|baby| baby.remove_collaborator(user)))
    }

    async fn delete_cascade(&self, id: &BabyId) -> Result<Option<CascadeReport>, StoreError> {
        let mut collections = self.write()?;
        if collections.babies.remove(id).is_none() {
            return Ok(None);
        }
        let baby_id = *id;
        let reminders_before = collections.reminders.len();
        collections
            .reminders
            .retain(|_, reminder| reminder.baby_id != baby_id);
        Ok(Some(CascadeReport {
            feedings: purge(&mut collections.feedings, baby_id),
            sleeps: purge(&mut collections.sleeps, baby_id),
            diapers: purge(&mut collections.diapers, baby_id),
            growth: purge(&mut collections.growth, baby_id),
            reminders: reminders_before - collections.reminders.len(),
        }))
    }
}
