//! Port for baby profile storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::StoreError;
use crate::domain::{Baby, BabyId, BabyPatch, UserId};

/// Number of documents removed by a cascading profile deletion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeReport {
    pub feedings: usize,
    pub sleeps: usize,
    pub diapers: usize,
    pub growth: usize,
    pub reminders: usize,
}

impl CascadeReport {
    /// Documents removed across all collections.
    pub fn total(&self) -> usize {
        self.feedings + self.sleeps + self.diapers + self.growth + self.reminders
    }
}

/// Storage for baby profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BabyRepository: Send + Sync {
    async fn insert(&self, baby: &Baby) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: &BabyId) -> Result<Option<Baby>, StoreError>;

    /// Profiles the user owns or collaborates on, oldest first.
    async fn list_accessible(&self, user: &UserId, limit: usize) -> Result<Vec<Baby>, StoreError>;

    /// Apply `patch` to a single profile. Returns the updated document, or
    /// `None` when the profile does not exist.
    async fn update_profile(
        &self,
        id: &BabyId,
        patch: &BabyPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Baby>, StoreError>;

    /// Remove `user` from the collaborator set. Returns `None` when the
    /// profile does not exist, otherwise whether the user was a member.
    async fn remove_collaborator(&self, id: &BabyId, user: &UserId)
    -> Result<Option<bool>, StoreError>;

    /// Delete the profile together with every record and reminder scoped to
    /// it, as one atomic step. Returns `None` when the profile does not exist.
    async fn delete_cascade(&self, id: &BabyId) -> Result<Option<CascadeReport>, StoreError>;
}
