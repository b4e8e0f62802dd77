//! Baby profiles and the access rules derived from them.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{BabyId, UserId};

/// Gender recorded on a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// How a user relates to a baby profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessTier {
    /// Created the profile. May delete it, invite, and revoke.
    Owner,
    /// Joined through an accepted invite. Full read/write on records.
    Collaborator,
}

/// A baby profile.
///
/// ## Invariants
/// - `user_id` (the owner) never changes.
/// - `shared_with` never contains the owner and has no duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Baby {
    pub baby_id: BabyId,
    /// Owner of the profile.
    pub user_id: UserId,
    pub name: String,
    #[schema(value_type = String, format = Date, example = "2024-01-15")]
    pub birth_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[schema(value_type = Vec<String>)]
    pub shared_with: BTreeSet<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Baby {
    /// Create a profile owned by `owner` with no collaborators.
    pub fn create(owner: UserId, draft: BabyDraft, now: DateTime<Utc>) -> Self {
        Self {
            baby_id: BabyId::generate(),
            user_id: owner,
            name: draft.name,
            birth_date: draft.birth_date,
            gender: draft.gender,
            photo: draft.photo,
            shared_with: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Access tier of `user`, or `None` when the user has no access.
    pub fn access_tier(&self, user: &UserId) -> Option<AccessTier> {
        if self.user_id == *user {
            Some(AccessTier::Owner)
        } else if self.shared_with.contains(user) {
            Some(AccessTier::Collaborator)
        } else {
            None
        }
    }

    /// Whether `user` created this profile.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        self.user_id == *user
    }

    /// Add a collaborator. Adding the owner or an existing member is a no-op.
    pub fn add_collaborator(&mut self, user: UserId) -> bool {
        if self.user_id == user {
            return false;
        }
        self.shared_with.insert(user)
    }

    /// Drop `user` from the collaborators, reporting whether it was present.
    pub fn remove_collaborator(&mut self, user: &UserId) -> bool {
        self.shared_with.remove(user)
    }

    /// Apply a partial profile update, bumping `updated_at`.
    pub fn apply(&mut self, patch: BabyPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(birth_date) = patch.birth_date {
            self.birth_date = birth_date;
        }
        if let Some(gender) = patch.gender {
            self.gender = Some(gender);
        }
        if let Some(photo) = patch.photo {
            self.photo = Some(photo);
        }
        self.updated_at = now;
    }
}

/// Validated input for a new profile.
#[derive(Debug, Clone, PartialEq)]
pub struct BabyDraft {
    pub name: String,
    pub birth_date: NaiveDate,
    pub gender: Option<Gender>,
    pub photo: Option<String>,
}

/// Partial profile update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BabyPatch {
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub photo: Option<String>,
}
