//! Tests for the sharing handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use chrono::{DateTime, Utc};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use crate::domain::SessionToken;
use crate::inbound::http::test_utils::{TestContext, bearer};
use crate::test_support::instant;

#[fixture]
fn now() -> DateTime<Utc> {
    instant(2024, 9, 3, 8, 0)
}

macro_rules! send {
    ($app:expr, $request:expr) => {
        actix_test::call_service(&$app, $request.to_request()).await
    };
}

fn invite_body(baby_id: impl ToString, email: &str) -> Value {
    json!({ "baby_id": baby_id.to_string(), "invitee_email": email })
}

fn post(uri: &str, token: &SessionToken) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri(uri)
        .insert_header(bearer(token))
}

#[rstest]
#[actix_web::test]
async fn invite_accept_grants_access(now: DateTime<Utc>) {
    let ctx = TestContext::new(now);
    let (owner, owner_token) = ctx.sign_in("owner@example.com").await;
    let (helper, helper_token) = ctx.sign_in("helper@example.com").await;
    let baby = ctx.add_baby(&owner, &[]).await;
    let app = actix_test::init_service(ctx.app()).await;

    let created = send!(
        app,
        post("/api/share/invite", &owner_token)
            .set_json(invite_body(baby.baby_id, "Helper@Example.com"))
    );
    assert_eq!(created.status(), StatusCode::OK);
    let invite: Value = actix_test::read_body_json(created).await;
    assert_eq!(invite["status"], "pending");
    assert_eq!(invite["invitee_email"], "helper@example.com");

    let inbox = send!(
        app,
        actix_test::TestRequest::get()
            .uri("/api/share/invites/pending")
            .insert_header(bearer(&helper_token))
    );
    let pending: Value = actix_test::read_body_json(inbox).await;
    assert_eq!(pending.as_array().map(Vec::len), Some(1));
    assert_eq!(pending[0]["baby_name"], baby.name.as_str());
    assert_eq!(pending[0]["inviter_name"], owner.name.as_str());
    let invite_id = pending[0]["invite_id"].as_str().expect("invite id").to_owned();

    let accepted = send!(
        app,
        post(&format!("/api/share/invite/{invite_id}/accept"), &helper_token)
    );
    assert_eq!(accepted.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(accepted).await;
    assert_eq!(body["message"], "Invite accepted");

    let profile = send!(
        app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/baby/{}", baby.baby_id))
            .insert_header(bearer(&helper_token))
    );
    assert_eq!(profile.status(), StatusCode::OK);
    let profile: Value = actix_test::read_body_json(profile).await;
    assert_eq!(profile["shared_with"], json!([helper.user_id.to_string()]));

    let again = send!(
        app,
        post(&format!("/api/share/invite/{invite_id}/decline"), &helper_token)
    );
    assert_eq!(again.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(again).await;
    assert_eq!(body["code"], "already_processed");
}

#[rstest]
#[actix_web::test]
async fn duplicate_pending_invites_are_rejected(now: DateTime<Utc>) {
    let ctx = TestContext::new(now);
    let (owner, token) = ctx.sign_in("owner@example.com").await;
    let baby = ctx.add_baby(&owner, &[]).await;
    let app = actix_test::init_service(ctx.app()).await;

    let first = send!(
        app,
        post("/api/share/invite", &token).set_json(invite_body(baby.baby_id, "helper@example.com"))
    );
    assert_eq!(first.status(), StatusCode::OK);
    let second = send!(
        app,
        post("/api/share/invite", &token).set_json(invite_body(baby.baby_id, "helper@example.com"))
    );

    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(second).await;
    assert_eq!(body["code"], "duplicate_invite");
}

#[rstest]
#[actix_web::test]
async fn collaborators_cannot_invite_or_revoke(now: DateTime<Utc>) {
    let ctx = TestContext::new(now);
    let (owner, _) = ctx.sign_in("owner@example.com").await;
    let (helper, helper_token) = ctx.sign_in("helper@example.com").await;
    let baby = ctx.add_baby(&owner, &[&helper]).await;
    let app = actix_test::init_service(ctx.app()).await;

    let invite = send!(
        app,
        post("/api/share/invite", &helper_token)
            .set_json(invite_body(baby.baby_id, "third@example.com"))
    );
    let revoke = send!(
        app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/share/{}/{}", baby.baby_id, owner.user_id))
            .insert_header(bearer(&helper_token))
    );

    assert_eq!(invite.status(), StatusCode::FORBIDDEN);
    assert_eq!(revoke.status(), StatusCode::FORBIDDEN);
}

#[rstest]
#[actix_web::test]
async fn invites_for_someone_else_are_forbidden(now: DateTime<Utc>) {
    let ctx = TestContext::new(now);
    let (owner, owner_token) = ctx.sign_in("owner@example.com").await;
    let (_, intruder_token) = ctx.sign_in("intruder@example.com").await;
    let baby = ctx.add_baby(&owner, &[]).await;
    let app = actix_test::init_service(ctx.app()).await;

    let created = send!(
        app,
        post("/api/share/invite", &owner_token)
            .set_json(invite_body(baby.baby_id, "helper@example.com"))
    );
    let invite: Value = actix_test::read_body_json(created).await;
    let invite_id = invite["invite_id"].as_str().expect("invite id").to_owned();

    let hijack = send!(
        app,
        post(&format!("/api/share/invite/{invite_id}/accept"), &intruder_token)
    );

    assert_eq!(hijack.status(), StatusCode::FORBIDDEN);
}

#[rstest]
#[actix_web::test]
async fn unknown_invites_are_not_found(now: DateTime<Utc>) {
    let ctx = TestContext::new(now);
    let (_, token) = ctx.sign_in("helper@example.com").await;
    let app = actix_test::init_service(ctx.app()).await;

    let response = send!(
        app,
        post(
            &format!("/api/share/invite/{}/accept", crate::domain::InviteId::generate()),
            &token
        )
    );

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn revoke_removes_access_and_tolerates_non_members(now: DateTime<Utc>) {
    let ctx = TestContext::new(now);
    let (owner, owner_token) = ctx.sign_in("owner@example.com").await;
    let (helper, helper_token) = ctx.sign_in("helper@example.com").await;
    let baby = ctx.add_baby(&owner, &[&helper]).await;
    let app = actix_test::init_service(ctx.app()).await;

    for _ in 0..2 {
        let response = send!(
            app,
            actix_test::TestRequest::delete()
                .uri(&format!("/api/share/{}/{}", baby.baby_id, helper.user_id))
                .insert_header(bearer(&owner_token))
        );
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["message"], "Access removed");
    }

    let profile = send!(
        app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/baby/{}", baby.baby_id))
            .insert_header(bearer(&helper_token))
    );
    assert_eq!(profile.status(), StatusCode::FORBIDDEN);
}

#[rstest]
#[actix_web::test]
async fn malformed_invitee_emails_are_invalid(now: DateTime<Utc>) {
    let ctx = TestContext::new(now);
    let (owner, token) = ctx.sign_in("owner@example.com").await;
    let baby = ctx.add_baby(&owner, &[]).await;
    let app = actix_test::init_service(ctx.app()).await;

    let response = send!(
        app,
        post("/api/share/invite", &token).set_json(invite_body(baby.baby_id, "not-an-email"))
    );

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
