//! Authorization gates over baby profiles.
//!
//! Two tiers exist: *access* (owner or collaborator) for reading and logging
//! records, and *owner* for deleting a profile and managing sharing.

use std::sync::Arc;

use super::ports::{BabyRepository, map_store_error};
use super::{AccessTier, Baby, BabyId, Error, UserId};

/// Decides whether a user may read or manage a baby.
#[derive(Clone)]
pub struct AccessPolicy {
    babies: Arc<dyn BabyRepository>,
}

impl AccessPolicy {
    /// Build a policy over the baby store.
    pub fn new(babies: Arc<dyn BabyRepository>) -> Self {
        Self { babies }
    }

    /// Whether `user` may read and write records of `baby_id`.
    ///
    /// A missing profile yields `false`, never an error.
    pub async fn has_access(&self, user: &UserId, baby_id: &BabyId) -> Result<bool, Error> {
        Ok(self.tier(user, baby_id).await?.is_some())
    }

    /// Load the profile when `user` has access.
    ///
    /// Missing profiles are reported as `forbidden`, indistinguishable from
    /// profiles the caller may not see.
    pub async fn require_access(&self, user: &UserId, baby_id: &BabyId) -> Result<Baby, Error> {
        match self.load(baby_id).await? {
            Some(baby) if baby.access_tier(user).is_some() => Ok(baby),
            _ => Err(Error::forbidden("access denied")),
        }
    }

    /// Load the profile when `user` owns it.
    ///
    /// Owner-gated operations distinguish a missing profile (`not_found`)
    /// from one owned by someone else (`forbidden`).
    pub async fn require_owner(&self, user: &UserId, baby_id: &BabyId) -> Result<Baby, Error> {
        let baby = self
            .load(baby_id)
            .await?
            .ok_or_else(|| Error::not_found("baby not found"))?;
        if baby.is_owned_by(user) {
            Ok(baby)
        } else {
            Err(Error::forbidden("only the owner can do this"))
        }
    }

    async fn tier(&self, user: &UserId, baby_id: &BabyId) -> Result<Option<AccessTier>, Error> {
        Ok(self
            .load(baby_id)
            .await?
            .and_then(|baby| baby.access_tier(user)))
    }

    async fn load(&self, baby_id: &BabyId) -> Result<Option<Baby>, Error> {
        self.babies
            .find_by_id(baby_id)
            .await
            .map_err(map_store_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockBabyRepository, StoreError};
    use crate::test_support::{baby_owned_by, date, instant};
    use rstest::rstest;

    #[derive(Debug, Clone, Copy)]
    enum Caller {
        Owner,
        Collaborator,
        Stranger,
    }

    fn policy_for(baby: Option<Baby>) -> AccessPolicy {
        let mut repo = MockBabyRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(baby.clone()));
        AccessPolicy::new(Arc::new(repo))
    }

    fn scenario(caller: Caller) -> (Baby, UserId) {
        let now = instant(2024, 1, 1, 0, 0);
        let mut baby = baby_owned_by(UserId::generate(), date(2023, 11, 1), now);
        let helper = UserId::generate();
        baby.add_collaborator(helper);
        let who = match caller {
            Caller::Owner => baby.user_id,
            Caller::Collaborator => helper,
            Caller::Stranger => UserId::generate(),
        };
        (baby, who)
    }

    #[rstest]
    #[case(Caller::Owner, true)]
    #[case(Caller::Collaborator, true)]
    #[case(Caller::Stranger, false)]
    #[tokio::test]
    async fn has_access_follows_membership(#[case] caller: Caller, #[case] expected: bool) {
        let (baby, who) = scenario(caller);
        let baby_id = baby.baby_id;
        let policy = policy_for(Some(baby));
        assert_eq!(policy.has_access(&who, &baby_id).await, Ok(expected));
    }

    #[rstest]
    #[tokio::test]
    async fn has_access_is_false_for_missing_profiles() {
        let policy = policy_for(None);
        let result = policy
            .has_access(&UserId::generate(), &BabyId::generate())
            .await;
        assert_eq!(result, Ok(false));
    }

    #[rstest]
    #[case(Caller::Owner, None)]
    #[case(Caller::Collaborator, Some(ErrorCode::Forbidden))]
    #[case(Caller::Stranger, Some(ErrorCode::Forbidden))]
    #[tokio::test]
    async fn require_owner_admits_only_the_owner(
        #[case] caller: Caller,
        #[case] expected: Option<ErrorCode>,
    ) {
        let (baby, who) = scenario(caller);
        let baby_id = baby.baby_id;
        let policy = policy_for(Some(baby));
        let result = policy.require_owner(&who, &baby_id).await;
        assert_eq!(result.err().map(|err| err.code()), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_profiles_differ_between_tiers() {
        let policy = policy_for(None);
        let user = UserId::generate();
        let baby_id = BabyId::generate();

        let access = policy.require_access(&user, &baby_id).await.expect_err("denied");
        let owner = policy.require_owner(&user, &baby_id).await.expect_err("missing");

        assert_eq!(access.code(), ErrorCode::Forbidden);
        assert_eq!(owner.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn store_outages_surface_as_unavailable() {
        let mut repo = MockBabyRepository::new();
        repo.expect_find_by_id()
            .returning(|_| Err(StoreError::connection("down")));
        let policy = AccessPolicy::new(Arc::new(repo));

        let err = policy
            .has_access(&UserId::generate(), &BabyId::generate())
            .await
            .expect_err("outage");

        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
