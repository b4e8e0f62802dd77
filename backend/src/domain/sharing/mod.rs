//! Invitation workflow that grants collaborators access to a baby.
//!
//! An invite starts `pending` and moves exactly once to `accepted` or
//! `declined`. Acceptance adds the invitee to the baby's collaborator set.

mod service;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{BabyId, EmailAddress, InviteId, UserId};

pub use service::SharingService;

/// Invite lifecycle; only `Pending` may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InviteStatus {
    Pending,
    Accepted,
    Declined,
}

/// Raised when a terminal invite is asked to transition again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invite already {status:?}")]
pub struct InviteAlreadyProcessed {
    pub status: InviteStatus,
}

/// Invitation for one address to collaborate on one baby.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShareInvite {
    pub invite_id: InviteId,
    pub baby_id: BabyId,
    pub inviter_user_id: UserId,
    pub invitee_email: EmailAddress,
    pub status: InviteStatus,
    pub created_at: DateTime<Utc>,
}

impl ShareInvite {
    /// New pending invite.
    pub fn new(
        baby_id: BabyId,
        inviter_user_id: UserId,
        invitee_email: EmailAddress,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            invite_id: InviteId::generate(),
            baby_id,
            inviter_user_id,
            invitee_email,
            status: InviteStatus::Pending,
            created_at: now,
        }
    }

    /// Whether the invite can still be accepted or declined.
    pub fn is_pending(&self) -> bool {
        self.status == InviteStatus::Pending
    }

    /// Whether `email` is the invitee.
    pub fn is_addressed_to(&self, email: &EmailAddress) -> bool {
        self.invitee_email == *email
    }

    /// Move a pending invite to `target`.
    ///
    /// Terminal invites are never re-processed, whatever the target.
    pub fn transition(&mut self, target: InviteStatus) -> Result<(), InviteAlreadyProcessed> {
        if !self.is_pending() {
            return Err(InviteAlreadyProcessed {
                status: self.status,
            });
        }
        self.status = target;
        Ok(())
    }
}

/// Pending invite enriched with display names for the invitee's inbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PendingInvite {
    #[serde(flatten)]
    pub invite: ShareInvite,
    pub baby_name: String,
    pub inviter_name: String,
}
