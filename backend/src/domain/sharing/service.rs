//! Owner-driven invitations and collaborator management.

use std::sync::Arc;

use mockable::Clock;
use tracing::{info, warn};

use super::{InviteStatus, PendingInvite, ShareInvite};
use crate::domain::ports::{
    BabyRepository, InviteTransition, SharingRepository, UserRepository, map_store_error,
};
use crate::domain::{AccessPolicy, BabyId, EmailAddress, Error, InviteId, User, UserId};

/// Display name used when an invite refers to a profile or account that no
/// longer exists.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Maximum number of pending invites returned to an invitee.
pub const PENDING_LIST_LIMIT: usize = 100;

/// Sharing use cases.
#[derive(Clone)]
pub struct SharingService {
    policy: AccessPolicy,
    babies: Arc<dyn BabyRepository>,
    users: Arc<dyn UserRepository>,
    invites: Arc<dyn SharingRepository>,
    clock: Arc<dyn Clock>,
}

impl SharingService {
    /// Build the service.
    pub fn new(
        babies: Arc<dyn BabyRepository>,
        users: Arc<dyn UserRepository>,
        invites: Arc<dyn SharingRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            policy: AccessPolicy::new(babies.clone()),
            babies,
            users,
            invites,
            clock,
        }
    }

    /// Invite `invitee_email` to collaborate on `baby_id`.
    ///
    /// Only the owner may invite, and at most one pending invite may exist
    /// per baby and address.
    pub async fn invite(
        &self,
        caller: &User,
        baby_id: BabyId,
        invitee_email: EmailAddress,
    ) -> Result<ShareInvite, Error> {
        self.policy.require_owner(&caller.user_id, &baby_id).await?;
        let invite = ShareInvite::new(baby_id, caller.user_id, invitee_email, self.clock.utc());
        let inserted = self
            .invites
            .insert_if_no_pending(&invite)
            .await
            .map_err(map_store_error)?;
        if !inserted {
            return Err(Error::duplicate_invite("invite already sent"));
        }
        info!(invite_id = %invite.invite_id, baby_id = %baby_id, "invite created");
        Ok(invite)
    }

    /// Pending invites addressed to the caller, with display names resolved.
    pub async fn pending_for(&self, caller: &User) -> Result<Vec<PendingInvite>, Error> {
        let invites = self
            .invites
            .list_pending_for(&caller.email, PENDING_LIST_LIMIT)
            .await
            .map_err(map_store_error)?;

        let mut enriched = Vec::with_capacity(invites.len());
        for invite in invites {
            let baby_name = self
                .babies
                .find_by_id(&invite.baby_id)
                .await
                .map_err(map_store_error)?
                .map_or_else(|| UNKNOWN_NAME.to_owned(), |baby| baby.name);
            let inviter_name = self
                .users
                .find_by_id(&invite.inviter_user_id)
                .await
                .map_err(map_store_error)?
                .map_or_else(|| UNKNOWN_NAME.to_owned(), |user| user.name);
            enriched.push(PendingInvite {
                invite,
                baby_name,
                inviter_name,
            });
        }
        Ok(enriched)
    }

    /// Accept an invite addressed to the caller, joining the baby's
    /// collaborators.
    ///
    /// The status change and membership grant happen in one store step, so a
    /// concurrent accept or decline observes `already_processed`.
    pub async fn accept(&self, caller: &User, invite_id: &InviteId) -> Result<ShareInvite, Error> {
        self.load_addressed(caller, invite_id).await?;
        let outcome = self
            .invites
            .accept(invite_id, &caller.user_id)
            .await
            .map_err(map_store_error)?;
        let invite = resolve_transition(outcome)?;
        info!(
            invite_id = %invite_id,
            baby_id = %invite.baby_id,
            user_id = %caller.user_id,
            "invite accepted"
        );
        Ok(invite)
    }

    /// Decline an invite addressed to the caller.
    pub async fn decline(&self, caller: &User, invite_id: &InviteId) -> Result<ShareInvite, Error> {
        self.load_addressed(caller, invite_id).await?;
        let outcome = self
            .invites
            .decline(invite_id)
            .await
            .map_err(map_store_error)?;
        let invite = resolve_transition(outcome)?;
        info!(invite_id = %invite_id, "invite declined");
        Ok(invite)
    }

    /// Remove a collaborator from a baby the caller owns.
    pub async fn revoke(
        &self,
        caller: &User,
        baby_id: &BabyId,
        member: &UserId,
    ) -> Result<(), Error> {
        self.policy.require_owner(&caller.user_id, baby_id).await?;
        let removed = self
            .babies
            .remove_collaborator(baby_id, member)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found("baby not found"))?;
        if removed {
            info!(baby_id = %baby_id, user_id = %member, "collaborator access revoked");
        }
        Ok(())
    }

    /// Load an invite and check it is pending and addressed to the caller.
    async fn load_addressed(&self, caller: &User, invite_id: &InviteId) -> Result<ShareInvite, Error> {
        let invite = self
            .invites
            .find_invite(invite_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found("invite not found"))?;
        if !invite.is_addressed_to(&caller.email) {
            return Err(Error::forbidden("this invite is not for you"));
        }
        if !invite.is_pending() {
            return Err(already_processed(invite.status));
        }
        Ok(invite)
    }
}

fn already_processed(status: InviteStatus) -> Error {
    Error::already_processed("invite already processed")
        .with_details(serde_json::json!({ "status": status }))
}

fn resolve_transition(outcome: InviteTransition) -> Result<ShareInvite, Error> {
    match outcome {
        InviteTransition::Applied(invite) => Ok(invite),
        InviteTransition::AlreadyProcessed(status) => Err(already_processed(status)),
        InviteTransition::MissingInvite => Err(Error::not_found("invite not found")),
        InviteTransition::MissingBaby => {
            warn!("invite refers to a deleted baby");
            Err(Error::not_found("baby not found"))
        }
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
