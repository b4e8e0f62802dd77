//! Regression coverage for [`SharingService`].

use super::*;
use crate::domain::ports::{MockBabyRepository, MockSharingRepository, MockUserRepository};
use crate::domain::{Baby, ErrorCode};
use crate::test_support::{MutableClock, baby_owned_by, date, instant, user};
use chrono::{DateTime, Utc};
use rstest::{fixture, rstest};

#[fixture]
fn now() -> DateTime<Utc> {
    instant(2024, 4, 4, 16, 0)
}

#[fixture]
fn owner(now: DateTime<Utc>) -> User {
    user("owner@example.com", now)
}

#[fixture]
fn invitee(now: DateTime<Utc>) -> User {
    user("helper@example.com", now)
}

struct Doubles {
    babies: MockBabyRepository,
    users: MockUserRepository,
    invites: MockSharingRepository,
}

impl Doubles {
    fn new() -> Self {
        Self {
            babies: MockBabyRepository::new(),
            users: MockUserRepository::new(),
            invites: MockSharingRepository::new(),
        }
    }

    fn with_baby(mut self, baby: Baby) -> Self {
        self.babies
            .expect_find_by_id()
            .returning(move |_| Ok(Some(baby.clone())));
        self
    }

    fn with_invite(mut self, invite: ShareInvite) -> Self {
        self.invites
            .expect_find_invite()
            .returning(move |_| Ok(Some(invite.clone())));
        self
    }

    fn build(self, now: DateTime<Utc>) -> SharingService {
        SharingService::new(
            Arc::new(self.babies),
            Arc::new(self.users),
            Arc::new(self.invites),
            Arc::new(MutableClock::new(now)),
        )
    }
}

fn email(raw: &str) -> EmailAddress {
    EmailAddress::new(raw).expect("email")
}

fn pending_invite(baby: &Baby, to: &str, now: DateTime<Utc>) -> ShareInvite {
    ShareInvite::new(baby.baby_id, baby.user_id, email(to), now)
}

#[rstest]
#[tokio::test]
async fn owners_create_pending_invites(owner: User, now: DateTime<Utc>) {
    let baby = baby_owned_by(owner.user_id, date(2024, 1, 1), now);
    let baby_id = baby.baby_id;
    let mut doubles = Doubles::new().with_baby(baby);
    doubles
        .invites
        .expect_insert_if_no_pending()
        .withf(|invite| invite.invitee_email.as_str() == "helper@example.com")
        .return_once(|_| Ok(true));

    let invite = doubles
        .build(now)
        .invite(&owner, baby_id, email(" Helper@Example.com "))
        .await
        .expect("invite");

    assert_eq!(invite.status, InviteStatus::Pending);
    assert_eq!(invite.inviter_user_id, owner.user_id);
}

#[rstest]
#[tokio::test]
async fn collaborators_cannot_invite(owner: User, invitee: User, now: DateTime<Utc>) {
    let mut baby = baby_owned_by(owner.user_id, date(2024, 1, 1), now);
    baby.add_collaborator(invitee.user_id);
    let baby_id = baby.baby_id;
    let mut doubles = Doubles::new().with_baby(baby);
    doubles.invites.expect_insert_if_no_pending().never();

    let err = doubles
        .build(now)
        .invite(&invitee, baby_id, email("third@example.com"))
        .await
        .expect_err("forbidden");

    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn duplicate_pending_invites_are_rejected(owner: User, now: DateTime<Utc>) {
    let baby = baby_owned_by(owner.user_id, date(2024, 1, 1), now);
    let baby_id = baby.baby_id;
    let mut doubles = Doubles::new().with_baby(baby);
    doubles
        .invites
        .expect_insert_if_no_pending()
        .return_once(|_| Ok(false));

    let err = doubles
        .build(now)
        .invite(&owner, baby_id, email("helper@example.com"))
        .await
        .expect_err("duplicate");

    assert_eq!(err.code(), ErrorCode::DuplicateInvite);
}

#[rstest]
#[tokio::test]
async fn inviting_for_a_missing_baby_is_not_found(owner: User, now: DateTime<Utc>) {
    let mut doubles = Doubles::new();
    doubles.babies.expect_find_by_id().return_once(|_| Ok(None));

    let err = doubles
        .build(now)
        .invite(&owner, BabyId::generate(), email("helper@example.com"))
        .await
        .expect_err("missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn pending_list_degrades_missing_names(owner: User, invitee: User, now: DateTime<Utc>) {
    let baby = baby_owned_by(owner.user_id, date(2024, 1, 1), now);
    let invite = pending_invite(&baby, "helper@example.com", now);
    let mut doubles = Doubles::new();
    doubles
        .invites
        .expect_list_pending_for()
        .withf(|email, _| email.as_str() == "helper@example.com")
        .return_once(move |_, _| Ok(vec![invite]));
    doubles.babies.expect_find_by_id().return_once(|_| Ok(None));
    let inviter = owner.clone();
    doubles
        .users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(inviter)));

    let pending = doubles
        .build(now)
        .pending_for(&invitee)
        .await
        .expect("list");

    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].baby_name, UNKNOWN_NAME);
    assert_eq!(pending[0].inviter_name, owner.name);
}

#[rstest]
#[tokio::test]
async fn only_the_addressee_may_accept(owner: User, now: DateTime<Utc>) {
    let baby = baby_owned_by(owner.user_id, date(2024, 1, 1), now);
    let invite = pending_invite(&baby, "helper@example.com", now);
    let invite_id = invite.invite_id;
    let mut doubles = Doubles::new().with_invite(invite);
    doubles.invites.expect_accept().never();
    let intruder = user("intruder@example.com", now);

    let err = doubles
        .build(now)
        .accept(&intruder, &invite_id)
        .await
        .expect_err("forbidden");

    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[case(InviteStatus::Accepted)]
#[case(InviteStatus::Declined)]
#[tokio::test]
async fn processed_invites_cannot_be_accepted_again(
    owner: User,
    invitee: User,
    now: DateTime<Utc>,
    #[case] status: InviteStatus,
) {
    let baby = baby_owned_by(owner.user_id, date(2024, 1, 1), now);
    let mut invite = pending_invite(&baby, "helper@example.com", now);
    invite.status = status;
    let invite_id = invite.invite_id;
    let mut doubles = Doubles::new().with_invite(invite);
    doubles.invites.expect_accept().never();

    let err = doubles
        .build(now)
        .accept(&invitee, &invite_id)
        .await
        .expect_err("processed");

    assert_eq!(err.code(), ErrorCode::AlreadyProcessed);
}

#[rstest]
#[tokio::test]
async fn losing_a_race_reports_already_processed(owner: User, invitee: User, now: DateTime<Utc>) {
    let baby = baby_owned_by(owner.user_id, date(2024, 1, 1), now);
    let invite = pending_invite(&baby, "helper@example.com", now);
    let invite_id = invite.invite_id;
    let mut doubles = Doubles::new().with_invite(invite);
    doubles
        .invites
        .expect_accept()
        .return_once(|_, _| Ok(InviteTransition::AlreadyProcessed(InviteStatus::Accepted)));

    let err = doubles
        .build(now)
        .accept(&invitee, &invite_id)
        .await
        .expect_err("raced");

    assert_eq!(err.code(), ErrorCode::AlreadyProcessed);
}

#[rstest]
#[tokio::test]
async fn accept_grants_membership_through_the_store(owner: User, invitee: User, now: DateTime<Utc>) {
    let baby = baby_owned_by(owner.user_id, date(2024, 1, 1), now);
    let invite = pending_invite(&baby, "helper@example.com", now);
    let invite_id = invite.invite_id;
    let mut accepted = invite.clone();
    accepted.status = InviteStatus::Accepted;
    let member = invitee.user_id;
    let mut doubles = Doubles::new().with_invite(invite);
    doubles
        .invites
        .expect_accept()
        .withf(move |id, user| *id == invite_id && *user == member)
        .times(1)
        .return_once(move |_, _| Ok(InviteTransition::Applied(accepted)));

    let result = doubles
        .build(now)
        .accept(&invitee, &invite_id)
        .await
        .expect("accepted");

    assert_eq!(result.status, InviteStatus::Accepted);
}

#[rstest]
#[tokio::test]
async fn accepting_for_a_deleted_baby_is_not_found(owner: User, invitee: User, now: DateTime<Utc>) {
    let baby = baby_owned_by(owner.user_id, date(2024, 1, 1), now);
    let invite = pending_invite(&baby, "helper@example.com", now);
    let invite_id = invite.invite_id;
    let mut doubles = Doubles::new().with_invite(invite);
    doubles
        .invites
        .expect_accept()
        .return_once(|_, _| Ok(InviteTransition::MissingBaby));

    let err = doubles
        .build(now)
        .accept(&invitee, &invite_id)
        .await
        .expect_err("missing baby");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn decline_has_no_membership_side_effect(owner: User, invitee: User, now: DateTime<Utc>) {
    let baby = baby_owned_by(owner.user_id, date(2024, 1, 1), now);
    let invite = pending_invite(&baby, "helper@example.com", now);
    let invite_id = invite.invite_id;
    let mut declined = invite.clone();
    declined.status = InviteStatus::Declined;
    let mut doubles = Doubles::new().with_invite(invite);
    doubles.invites.expect_accept().never();
    doubles.babies.expect_remove_collaborator().never();
    doubles
        .invites
        .expect_decline()
        .return_once(move |_| Ok(InviteTransition::Applied(declined)));

    let result = doubles
        .build(now)
        .decline(&invitee, &invite_id)
        .await
        .expect("declined");

    assert_eq!(result.status, InviteStatus::Declined);
}

#[rstest]
#[tokio::test]
async fn revoke_is_owner_only_and_unconditional(owner: User, invitee: User, now: DateTime<Utc>) {
    let baby = baby_owned_by(owner.user_id, date(2024, 1, 1), now);
    let baby_id = baby.baby_id;
    let mut doubles = Doubles::new().with_baby(baby);
    doubles
        .babies
        .expect_remove_collaborator()
        .times(1)
        .return_once(|_, _| Ok(Some(false)));
    let service = doubles.build(now);

    service
        .revoke(&owner, &baby_id, &invitee.user_id)
        .await
        .expect("revoked even without membership");
    let err = service
        .revoke(&invitee, &baby_id, &owner.user_id)
        .await
        .expect_err("forbidden");

    assert_eq!(err.code(), ErrorCode::Forbidden);
}
