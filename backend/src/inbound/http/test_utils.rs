//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, web};
use chrono::{DateTime, Duration, Utc};

use crate::domain::ports::{
    BabyRepository, MockIdentityProvider, SessionRepository, UserRepository,
};
use crate::domain::{Baby, Session, SessionToken, User};
use crate::outbound::memory::MemoryStore;
use crate::test_support::{MutableClock, baby_owned_by, date, user};

use super::routes;
use super::state::{HttpState, HttpStatePorts, SessionPolicy};

/// In-memory wiring of the full HTTP surface.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub clock: Arc<MutableClock>,
    pub state: web::Data<HttpState>,
}

impl TestContext {
    /// Context whose identity provider must not be called.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self::with_identity(now, MockIdentityProvider::new())
    }

    pub fn with_identity(now: DateTime<Utc>, identity: MockIdentityProvider) -> Self {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(MutableClock::new(now));
        let ports = HttpStatePorts {
            users: store.clone(),
            sessions: store.clone(),
            babies: store.clone(),
            records: store.clone(),
            invites: store.clone(),
            reminders: store.clone(),
            identity: Arc::new(identity),
            clock: clock.clone(),
        };
        let state = web::Data::new(HttpState::new(ports, SessionPolicy::default()));
        Self {
            store,
            clock,
            state,
        }
    }

    /// Register `email` and open a week-long session for it.
    pub async fn sign_in(&self, email: &str) -> (User, SessionToken) {
        let now = mockable::Clock::utc(self.clock.as_ref());
        let account = self
            .store
            .find_or_insert(&user(email, now))
            .await
            .expect("user stored");
        let token = SessionToken::new(format!("token-{}", account.user_id)).expect("token");
        let session = Session::issue(account.user_id, token.clone(), now, Duration::days(7));
        SessionRepository::insert(self.store.as_ref(), &session)
            .await
            .expect("session stored");
        (account, token)
    }

    /// Store a profile owned by `owner`, optionally shared with `collaborators`.
    pub async fn add_baby(&self, owner: &User, collaborators: &[&User]) -> Baby {
        let now = mockable::Clock::utc(self.clock.as_ref());
        let mut baby = baby_owned_by(owner.user_id, date(2024, 6, 1), now);
        for member in collaborators {
            baby.add_collaborator(member.user_id);
        }
        BabyRepository::insert(self.store.as_ref(), &baby)
            .await
            .expect("baby stored");
        baby
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(self.state.clone())
            .configure(routes::configure)
    }
}

/// `Authorization` header presenting `token`.
pub fn bearer(token: &SessionToken) -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {}", token.expose()))
}
