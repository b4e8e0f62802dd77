//! Port for account storage.

use async_trait::async_trait;

use super::StoreError;
use crate::domain::{User, UserId};

/// Storage for accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Return the account registered for `candidate.email`, inserting
    /// `candidate` first when none exists.
    ///
    /// The check and the insert are atomic, so one email maps to one account
    /// even under concurrent first logins.
    async fn find_or_insert(&self, candidate: &User) -> Result<User, StoreError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError>;
}
