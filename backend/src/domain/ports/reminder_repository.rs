//! Port for reminder storage.

use async_trait::async_trait;

use super::StoreError;
use crate::domain::{BabyId, Reminder, ReminderId};

/// Storage for reminders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReminderRepository: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> Result<(), StoreError>;

    /// Active reminders for `baby_id`, earliest `time` first.
    async fn list_active(&self, baby_id: &BabyId, limit: usize) -> Result<Vec<Reminder>, StoreError>;

    async fn find(&self, id: &ReminderId) -> Result<Option<Reminder>, StoreError>;

    async fn delete(&self, id: &ReminderId) -> Result<bool, StoreError>;
}
