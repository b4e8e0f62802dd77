//! Use-cases for creating, reading, updating, and deleting baby profiles.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use super::ports::{BabyRepository, map_store_error};
use super::{AccessPolicy, Baby, BabyDraft, BabyId, BabyPatch, Error, User};

/// Maximum number of profiles returned by a list.
pub const BABY_LIST_LIMIT: usize = 100;

/// Baby profile use cases.
#[derive(Clone)]
pub struct BabyProfileService {
    policy: AccessPolicy,
    babies: Arc<dyn BabyRepository>,
    clock: Arc<dyn Clock>,
}

impl BabyProfileService {
    /// Build the service.
    pub fn new(babies: Arc<dyn BabyRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            policy: AccessPolicy::new(babies.clone()),
            babies,
            clock,
        }
    }

    /// Create a profile owned by the caller.
    pub async fn create(&self, caller: &User, draft: BabyDraft) -> Result<Baby, Error> {
        let draft = validate_draft(draft)?;
        let baby = Baby::create(caller.user_id, draft, self.clock.utc());
        self.babies.insert(&baby).await.map_err(map_store_error)?;
        info!(baby_id = %baby.baby_id, owner = %caller.user_id, "baby profile created");
        Ok(baby)
    }

    /// Profiles the caller owns or collaborates on.
    pub async fn list(&self, caller: &User) -> Result<Vec<Baby>, Error> {
        self.babies
            .list_accessible(&caller.user_id, BABY_LIST_LIMIT)
            .await
            .map_err(map_store_error)
    }

    /// Fetch a profile the caller can access.
    pub async fn get(&self, caller: &User, baby_id: &BabyId) -> Result<Baby, Error> {
        self.policy.require_access(&caller.user_id, baby_id).await
    }

    /// Apply a partial update to a profile the caller can access.
    pub async fn update(
        &self,
        caller: &User,
        baby_id: &BabyId,
        patch: BabyPatch,
    ) -> Result<Baby, Error> {
        let patch = validate_patch(patch)?;
        self.policy.require_access(&caller.user_id, baby_id).await?;
        self.babies
            .update_profile(baby_id, &patch, self.clock.utc())
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found("baby not found"))
    }

    /// Delete a profile with every record and reminder scoped to it.
    pub async fn delete(&self, caller: &User, baby_id: &BabyId) -> Result<(), Error> {
        self.policy.require_owner(&caller.user_id, baby_id).await?;
        let report = self
            .babies
            .delete_cascade(baby_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found("baby not found"))?;
        info!(
            baby_id = %baby_id,
            removed_records = report.total(),
            "baby profile deleted"
        );
        Ok(())
    }
}

fn validate_name(name: String) -> Result<String, Error> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_request("name must not be empty")
            .with_details(serde_json::json!({ "field": "name" })));
    }
    Ok(trimmed.to_owned())
}

fn validate_draft(draft: BabyDraft) -> Result<BabyDraft, Error> {
    Ok(BabyDraft {
        name: validate_name(draft.name)?,
        ..draft
    })
}

fn validate_patch(patch: BabyPatch) -> Result<BabyPatch, Error> {
    let name = patch.name.map(validate_name).transpose()?;
    Ok(BabyPatch { name, ..patch })
}

#[cfg(test)]
#[path = "baby_profile_service_tests.rs"]
mod tests;
