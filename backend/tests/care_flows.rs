//! End-to-end flows over the full HTTP surface with an in-memory store and a
//! scripted identity provider.

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use actix_web::{App, web};
use async_trait::async_trait;
use rstest::rstest;
use serde_json::{Value, json};

use daybook::Trace;
use daybook::domain::ports::{IdentityProvider, IdentityProviderError};
use daybook::domain::{
    EmailAddress, ExternalIdentity, ExternalSessionId, SessionToken, TRACE_ID_HEADER,
};
use daybook::inbound::http::routes;
use daybook::inbound::http::session::SESSION_COOKIE_NAME;
use daybook::inbound::http::state::{HttpState, HttpStatePorts, SessionPolicy};
use daybook::outbound::memory::MemoryStore;

/// Identity provider answering from a fixed table of external session ids.
struct ScriptedIdentity {
    known: HashMap<String, (String, String)>,
}

impl ScriptedIdentity {
    fn new(entries: &[(&str, &str, &str)]) -> Self {
        let known = entries
            .iter()
            .map(|(session, email, token)| {
                ((*session).to_owned(), ((*email).to_owned(), (*token).to_owned()))
            })
            .collect();
        Self { known }
    }
}

#[async_trait]
impl IdentityProvider for ScriptedIdentity {
    async fn exchange(
        &self,
        session_id: &ExternalSessionId,
    ) -> Result<ExternalIdentity, IdentityProviderError> {
        let (email, token) = self
            .known
            .get(session_id.expose())
            .ok_or_else(|| IdentityProviderError::rejected(401_u16))?;
        let email =
            EmailAddress::new(email).map_err(|err| IdentityProviderError::decode(err.to_string()))?;
        Ok(ExternalIdentity {
            name: email.as_str().to_owned(),
            email,
            picture: None,
            session_token: SessionToken::new(token.clone())
                .map_err(|err| IdentityProviderError::decode(err.to_string()))?,
        })
    }
}

fn state() -> web::Data<HttpState> {
    let store = Arc::new(MemoryStore::new());
    let identity = ScriptedIdentity::new(&[
        ("ext-owner", "owner@example.com", "owner-token"),
        ("ext-helper", "helper@example.com", "helper-token"),
    ]);
    web::Data::new(HttpState::new(
        HttpStatePorts {
            users: store.clone(),
            sessions: store.clone(),
            babies: store.clone(),
            records: store.clone(),
            invites: store.clone(),
            reminders: store,
            identity: Arc::new(identity),
            clock: Arc::new(mockable::DefaultClock),
        },
        SessionPolicy::default(),
    ))
}

async fn body_json(response: ServiceResponse) -> Value {
    let status = response.status();
    let bytes = actix_test::read_body(response).await;
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|err| panic!("status {status}: body is not JSON: {err}"))
}

async fn sign_in<S>(app: &S, external: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/auth/session")
        .insert_header(("X-Session-ID", external))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.into_owned())
        .expect("session cookie")
}

#[rstest]
#[actix_web::test]
async fn owner_shares_a_baby_and_both_parents_log_care() {
    let app = actix_test::init_service(
        App::new()
            .app_data(state())
            .wrap(Trace)
            .configure(routes::configure),
    )
    .await;
    let owner = sign_in(&app, "ext-owner").await;
    let helper = sign_in(&app, "ext-helper").await;

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/baby")
            .cookie(owner.clone())
            .set_json(json!({ "name": "Robin", "birth_date": "2024-06-01" }))
            .to_request(),
    )
    .await;
    assert!(created.headers().contains_key(TRACE_ID_HEADER));
    let baby = body_json(created).await;
    let baby_id = baby["baby_id"].as_str().expect("baby id").to_owned();

    let invite = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/share/invite")
            .cookie(owner.clone())
            .set_json(json!({ "baby_id": baby_id, "invitee_email": "helper@example.com" }))
            .to_request(),
    )
    .await;
    let invite_id = body_json(invite).await["invite_id"]
        .as_str()
        .expect("invite id")
        .to_owned();

    let accepted = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/share/invite/{invite_id}/accept"))
            .cookie(helper.clone())
            .to_request(),
    )
    .await;
    assert_eq!(accepted.status(), StatusCode::OK);

    let logged = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/diaper")
            .cookie(helper.clone())
            .set_json(json!({
                "baby_id": baby_id,
                "diaper_type": "dirty",
                "time": chrono::Utc::now().to_rfc3339()
            }))
            .to_request(),
    )
    .await;
    assert_eq!(logged.status(), StatusCode::OK);

    let stats = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/stats/{baby_id}"))
            .cookie(owner.clone())
            .to_request(),
    )
    .await;
    let stats = body_json(stats).await;
    assert_eq!(stats["diaper"]["dirty"], 1);

    let listed = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/baby")
            .cookie(helper.clone())
            .to_request(),
    )
    .await;
    assert_eq!(body_json(listed).await.as_array().map(Vec::len), Some(1));

    let helper_id = {
        let me = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/auth/me")
                .cookie(helper.clone())
                .to_request(),
        )
        .await;
        body_json(me).await["user_id"]
            .as_str()
            .expect("user id")
            .to_owned()
    };
    let revoked = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/share/{baby_id}/{helper_id}"))
            .cookie(owner.clone())
            .to_request(),
    )
    .await;
    assert_eq!(revoked.status(), StatusCode::OK);

    let locked_out = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/timeline/{baby_id}"))
            .cookie(helper.clone())
            .to_request(),
    )
    .await;
    assert_eq!(locked_out.status(), StatusCode::FORBIDDEN);
    let body = body_json(locked_out).await;
    assert_eq!(body["code"], "forbidden");
    assert!(body["trace_id"].is_string());
}

#[rstest]
#[actix_web::test]
async fn unknown_external_sessions_do_not_create_accounts() {
    let app = actix_test::init_service(
        App::new()
            .app_data(state())
            .configure(routes::configure),
    )
    .await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/session")
            .insert_header(("X-Session-ID", "ext-stranger"))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(
        response
            .response()
            .cookies()
            .all(|cookie| cookie.name() != SESSION_COOKIE_NAME)
    );
}

#[rstest]
#[actix_web::test]
async fn logout_ends_the_cookie_session() {
    let app = actix_test::init_service(
        App::new()
            .app_data(state())
            .configure(routes::configure),
    )
    .await;
    let owner = sign_in(&app, "ext-owner").await;

    let logout = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/logout")
            .cookie(owner.clone())
            .to_request(),
    )
    .await;
    assert_eq!(logout.status(), StatusCode::OK);

    let me = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/auth/me")
            .cookie(owner)
            .to_request(),
    )
    .await;
    assert_eq!(me.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn banner_and_health_are_public() {
    let app = actix_test::init_service(
        App::new()
            .app_data(state())
            .configure(routes::configure),
    )
    .await;

    for (uri, key, expected) in [
        ("/api/", "message", "Baby Day Book API"),
        ("/api/health", "status", "healthy"),
    ] {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri(uri).to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await[key], expected);
    }
}
