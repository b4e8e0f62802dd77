//! Port for share invite storage.

use async_trait::async_trait;

use super::StoreError;
use crate::domain::{EmailAddress, InviteId, InviteStatus, ShareInvite, UserId};

/// Result of an atomic invite transition.
#[derive(Debug, Clone, PartialEq)]
pub enum InviteTransition {
    /// The invite moved out of `pending`; carries the updated document.
    Applied(ShareInvite),
    /// Another request processed the invite first.
    AlreadyProcessed(InviteStatus),
    /// No invite with that identifier exists.
    MissingInvite,
    /// The invite's baby no longer exists; nothing was changed.
    MissingBaby,
}

/// Storage for share invites.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SharingRepository: Send + Sync {
    /// Insert `invite` unless a pending invite for the same baby and email
    /// already exists. Returns `false`, storing nothing, in that case.
    async fn insert_if_no_pending(&self, invite: &ShareInvite) -> Result<bool, StoreError>;

    async fn find_invite(&self, id: &InviteId) -> Result<Option<ShareInvite>, StoreError>;

    async fn list_pending_for(
        &self,
        email: &EmailAddress,
        limit: usize,
    ) -> Result<Vec<ShareInvite>, StoreError>;

    /// Mark a pending invite accepted and add `member` to its baby's
    /// collaborator set in one atomic step.
    async fn accept(&self, id: &InviteId, member: &UserId) -> Result<InviteTransition, StoreError>;

    /// Mark a pending invite declined.
    async fn decline(&self, id: &InviteId) -> Result<InviteTransition, StoreError>;
}
