//! `user_sessions` collection.

use std::collections::hash_map::Entry;

use async_trait::async_trait;

use super::MemoryStore;
use crate::domain::ports::{SessionRepository, StoreError};
use crate::domain::{Session, SessionToken};

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn insert(&self, session: &Session) -> Result<(), StoreError> {
        let mut collections = self.write()?;
        match collections.sessions.entry(session.token.expose().to_owned()) {
            Entry::Occupied(_) => Err(StoreError::conflict("session token already issued")),
            Entry::Vacant(slot) => {
                slot.insert(session.clone());
                Ok(())
            }
        }
    }

    async fn find_by_token(&self, token: &SessionToken) -> Result<Option<Session>, StoreError> {
        Ok(self.read()?.sessions.get(token.expose()).cloned())
    }

    async fn delete_by_token(&self, token: &SessionToken) -> Result<bool, StoreError> {
        Ok(self.write()?.sessions.remove(token.expose()).is_some())
    }
}
