//! `share_invites` collection.

use async_trait::async_trait;

use super::MemoryStore;
use crate::domain::ports::{InviteTransition, SharingRepository, StoreError};
use crate::domain::{EmailAddress, InviteId, InviteStatus, ShareInvite, UserId};

#[async_trait]
impl SharingRepository for MemoryStore {
    async fn insert_if_no_pending(&self, invite: &ShareInvite) -> Result<bool, StoreError> {
        let mut collections = self.write()?;
        let duplicate = collections.invites.values().any(|existing| {
            existing.is_pending()
                && existing.baby_id == invite.baby_id
                && existing.invitee_email == invite.invitee_email
        });
        if duplicate {
            return Ok(false);
        }
        collections.invites.insert(invite.invite_id, invite.clone());
        Ok(true)
    }

    async fn find_invite(&self, id: &InviteId) -> Result<Option<ShareInvite>, StoreError> {
        Ok(self.read()?.invites.get(id).cloned())
    }

    async fn list_pending_for(
        &self,
        email: &EmailAddress,
        limit: usize,
    ) -> Result<Vec<ShareInvite>, StoreError> {
        let collections = self.read()?;
        let mut invites: Vec<ShareInvite> = collections
            .invites
            .values()
            .filter(|invite| invite.is_pending() && invite.is_addressed_to(email))
            .cloned()
            .collect();
        invites.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.invite_id.cmp(&b.invite_id))
        });
        invites.truncate(limit);
        Ok(invites)
    }

    async fn accept(&self, id: &InviteId, member: &UserId) -> Result<InviteTransition, StoreError> {
        let mut collections = self.write()?;
        let Some(invite) = collections.invites.get(id) else {
            return Ok(InviteTransition::MissingInvite);
        };
        if !invite.is_pending() {
            return Ok(InviteTransition::AlreadyProcessed(invite.status));
        }
        let baby_id = invite.baby_id;
        let Some(baby) = collections.babies.get_mut(&baby_id) else {
            return Ok(InviteTransition::MissingBaby);
        };
        baby.add_collaborator(*member);
        transition(&mut collections.invites, id, InviteStatus::Accepted)
    }

    async fn decline(&self, id: &InviteId) -> Result<InviteTransition, StoreError> {
        let mut collections = self.write()?;
        transition(&mut collections.invites, id, InviteStatus::Declined)
    }
}

fn transition(
    invites: &mut std::collections::HashMap<InviteId, ShareInvite>,
    id: &InviteId,
    target: InviteStatus,
) -> Result<InviteTransition, StoreError> {
    let Some(invite) = invites.get_mut(id) else {
        return Ok(InviteTransition::MissingInvite);
    };
    Ok(match invite.transition(target) {
        Ok(()) => InviteTransition::Applied(invite.clone()),
        Err(processed) => InviteTransition::AlreadyProcessed(processed.status),
    })
}
