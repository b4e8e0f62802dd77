//! Tests for the reminder handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use chrono::{DateTime, Utc};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use crate::inbound::http::test_utils::{TestContext, bearer};
use crate::test_support::instant;

#[fixture]
fn now() -> DateTime<Utc> {
    instant(2024, 9, 3, 8, 0)
}

#[rstest]
#[actix_web::test]
async fn reminders_are_listed_soonest_first_and_deletable(now: DateTime<Utc>) {
    let ctx = TestContext::new(now);
    let (owner, owner_token) = ctx.sign_in("owner@example.com").await;
    let (helper, helper_token) = ctx.sign_in("helper@example.com").await;
    let baby = ctx.add_baby(&owner, &[&helper]).await;
    let app = actix_test::init_service(ctx.app()).await;

    for (token, time, kind) in [
        (&owner_token, "2024-09-03T15:00:00Z", "medicine"),
        (&helper_token, "2024-09-03T11:00:00Z", "feeding"),
    ] {
        let request = actix_test::TestRequest::post()
            .uri("/api/reminder")
            .insert_header(bearer(token))
            .set_json(json!({
                "baby_id": baby.baby_id,
                "reminder_type": kind,
                "time": time,
                "message": "check in"
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let list = actix_test::TestRequest::get()
        .uri(&format!("/api/reminder/{}", baby.baby_id))
        .insert_header(bearer(&owner_token))
        .to_request();
    let listed: Value = actix_test::call_and_read_body_json(&app, list).await;
    assert_eq!(listed[0]["reminder_type"], "feeding");
    assert_eq!(listed[0]["is_active"], true);
    assert_eq!(listed[1]["reminder_type"], "medicine");
    let first = listed[0]["reminder_id"].as_str().expect("id").to_owned();

    let delete = actix_test::TestRequest::delete()
        .uri(&format!("/api/reminder/{first}"))
        .insert_header(bearer(&owner_token))
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, delete).await;
    assert_eq!(body["message"], "Reminder deleted");

    let again = actix_test::TestRequest::delete()
        .uri(&format!("/api/reminder/{first}"))
        .insert_header(bearer(&owner_token))
        .to_request();
    let response = actix_test::call_service(&app, again).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn strangers_cannot_manage_reminders(now: DateTime<Utc>) {
    let ctx = TestContext::new(now);
    let (owner, _) = ctx.sign_in("owner@example.com").await;
    let (_, stranger_token) = ctx.sign_in("stranger@example.com").await;
    let baby = ctx.add_baby(&owner, &[]).await;
    let app = actix_test::init_service(ctx.app()).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/reminder")
        .insert_header(bearer(&stranger_token))
        .set_json(json!({
            "baby_id": baby.baby_id,
            "reminder_type": "sleep",
            "time": "2024-09-03T11:00:00Z",
            "message": "nap"
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[rstest]
#[case(json!({ "reminder_type": "sleep", "time": "soon", "message": "nap" }))]
#[case(json!({ "reminder_type": "bath", "time": "2024-09-03T11:00:00Z", "message": "splash" }))]
#[actix_web::test]
async fn malformed_reminders_are_rejected(now: DateTime<Utc>, #[case] mut body: Value) {
    let ctx = TestContext::new(now);
    let (owner, token) = ctx.sign_in("owner@example.com").await;
    let baby = ctx.add_baby(&owner, &[]).await;
    body["baby_id"] = json!(baby.baby_id);
    let app = actix_test::init_service(ctx.app()).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/reminder")
        .insert_header(bearer(&token))
        .set_json(body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
