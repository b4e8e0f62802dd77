//! Reminders attached to a baby and the service managing them.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use super::ports::{ReminderRepository, map_store_error};
use super::{AccessPolicy, BabyId, Error, ReminderId, User, UserId};

/// Maximum number of reminders returned by a list.
pub const REMINDER_LIST_LIMIT: usize = 100;

/// What a reminder is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReminderType {
    Feeding,
    Sleep,
    Diaper,
    Medicine,
}

/// Stored reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Reminder {
    pub reminder_id: ReminderId,
    pub baby_id: BabyId,
    pub user_id: UserId,
    pub reminder_type: ReminderType,
    pub time: DateTime<Utc>,
    pub message: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied reminder fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderDraft {
    pub baby_id: BabyId,
    pub reminder_type: ReminderType,
    pub time: DateTime<Utc>,
    pub message: String,
}

/// Reminder use cases.
#[derive(Clone)]
pub struct ReminderService {
    policy: AccessPolicy,
    reminders: Arc<dyn ReminderRepository>,
    clock: Arc<dyn Clock>,
}

impl ReminderService {
    /// Build the service.
    pub fn new(
        policy: AccessPolicy,
        reminders: Arc<dyn ReminderRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            policy,
            reminders,
            clock,
        }
    }

    /// Create an active reminder for a baby the caller can access.
    pub async fn create(&self, caller: &User, draft: ReminderDraft) -> Result<Reminder, Error> {
        self.policy
            .require_access(&caller.user_id, &draft.baby_id)
            .await?;
        let reminder = Reminder {
            reminder_id: ReminderId::generate(),
            baby_id: draft.baby_id,
            user_id: caller.user_id,
            reminder_type: draft.reminder_type,
            time: draft.time,
            message: draft.message,
            is_active: true,
            created_at: self.clock.utc(),
        };
        self.reminders
            .insert(&reminder)
            .await
            .map_err(map_store_error)?;
        Ok(reminder)
    }

    /// Active reminders for a baby, earliest first.
    pub async fn list_active(&self, caller: &User, baby_id: &BabyId) -> Result<Vec<Reminder>, Error> {
        self.policy.require_access(&caller.user_id, baby_id).await?;
        self.reminders
            .list_active(baby_id, REMINDER_LIST_LIMIT)
            .await
            .map_err(map_store_error)
    }

    /// Delete a reminder whose baby the caller can access.
    pub async fn delete(&self, caller: &User, reminder_id: &ReminderId) -> Result<(), Error> {
        let reminder = self
            .reminders
            .find(reminder_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found("reminder not found"))?;
        self.policy
            .require_access(&caller.user_id, &reminder.baby_id)
            .await?;
        let removed = self
            .reminders
            .delete(reminder_id)
            .await
            .map_err(map_store_error)?;
        if !removed {
            return Err(Error::not_found("reminder not found"));
        }
        info!(reminder_id = %reminder_id, "reminder deleted");
        Ok(())
    }
}
