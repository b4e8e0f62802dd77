//! `reminders` collection.

use async_trait::async_trait;

use super::MemoryStore;
use crate::domain::ports::{ReminderRepository, StoreError};
use crate::domain::{BabyId, Reminder, ReminderId};

#[async_trait]
impl ReminderRepository for MemoryStore {
    async fn insert(&self, reminder: &Reminder) -> Result<(), StoreError> {
        let mut collections = self.write()?;
        if collections.reminders.contains_key(&reminder.reminder_id) {
            return Err(StoreError::conflict("reminder id already exists"));
        }
        collections
            .reminders
            .insert(reminder.reminder_id, reminder.clone());
        Ok(())
    }

    async fn list_active(&self, baby_id: &BabyId, limit: usize) -> Result<Vec<Reminder>, StoreError> {
        let collections = self.read()?;
        let mut reminders: Vec<Reminder> = collections
            .reminders
            .values()
            .filter(|reminder| reminder.is_active && reminder.baby_id == *baby_id)
            .cloned()
            .collect();
        reminders.sort_by(|a, b| {
            a.time
                .cmp(&b.time)
                .then_with(|| a.reminder_id.cmp(&b.reminder_id))
        });
        reminders.truncate(limit);
        Ok(reminders)
    }

    async fn find(&self, id: &ReminderId) -> Result<Option<Reminder>, StoreError> {
        Ok(self.read()?.reminders.get(id).cloned())
    }

    async fn delete(&self, id: &ReminderId) -> Result<bool, StoreError> {
        Ok(self.write()?.reminders.remove(id).is_some())
    }
}
