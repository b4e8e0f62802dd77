//! `users` collection.

use async_trait::async_trait;

use super::MemoryStore;
use crate::domain::ports::{StoreError, UserRepository};
use crate::domain::{User, UserId};

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_or_insert(&self, candidate: &User) -> Result<User, StoreError> {
        let mut collections = self.write()?;
        if let Some(existing) = collections
            .users
            .values()
            .find(|user| user.email == candidate.email)
        {
            return Ok(existing.clone());
        }
        collections
            .users
            .insert(candidate.user_id, candidate.clone());
        Ok(candidate.clone())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(self.read()?.users.get(id).cloned())
    }
}
