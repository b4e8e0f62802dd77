//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and remain testable without I/O.

use std::sync::Arc;

use chrono::Duration;
use mockable::Clock;

use crate::domain::ports::{
    ActivityRepository, BabyRepository, IdentityProvider, ReminderRepository, SessionRepository,
    SharingRepository, UserRepository,
};
use crate::domain::{
    AccessPolicy, ActivityService, AggregationService, BabyProfileService,
    DEFAULT_SESSION_TTL_DAYS, LoginService, ReminderService, SessionAuthenticator,
    SharingService, SleepPredictionService,
};

use super::session::SessionCookieSettings;

/// Parameter object bundling every driven port the HTTP surface needs.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub babies: Arc<dyn BabyRepository>,
    pub records: Arc<dyn ActivityRepository>,
    pub invites: Arc<dyn SharingRepository>,
    pub reminders: Arc<dyn ReminderRepository>,
    pub identity: Arc<dyn IdentityProvider>,
    pub clock: Arc<dyn Clock>,
}

/// Session lifetime and cookie attributes.
#[derive(Debug, Clone, Copy)]
pub struct SessionPolicy {
    pub ttl: Duration,
    pub cookie: SessionCookieSettings,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            ttl: Duration::days(DEFAULT_SESSION_TTL_DAYS),
            cookie: SessionCookieSettings::default(),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub authenticator: SessionAuthenticator,
    pub login: LoginService,
    pub babies: BabyProfileService,
    pub activities: ActivityService,
    pub aggregation: AggregationService,
    pub prediction: SleepPredictionService,
    pub sharing: SharingService,
    pub reminders: ReminderService,
    pub cookie: SessionCookieSettings,
}

impl HttpState {
    /// Wire domain services over the supplied ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use daybook::inbound::http::state::{HttpState, HttpStatePorts, SessionPolicy};
    /// use daybook::outbound::identity::HttpIdentityProvider;
    /// use daybook::outbound::memory::MemoryStore;
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(MemoryStore::new());
    /// let endpoint = "http://127.0.0.1:9/session-data".parse().expect("url");
    /// let identity = HttpIdentityProvider::new(endpoint, std::time::Duration::from_secs(5))
    ///     .expect("client");
    /// let ports = HttpStatePorts {
    ///     users: store.clone(),
    ///     sessions: store.clone(),
    ///     babies: store.clone(),
    ///     records: store.clone(),
    ///     invites: store.clone(),
    ///     reminders: store,
    ///     identity: Arc::new(identity),
    ///     clock: Arc::new(DefaultClock),
    /// };
    /// let _state = HttpState::new(ports, SessionPolicy::default());
    /// ```
    pub fn new(ports: HttpStatePorts, session: SessionPolicy) -> Self {
        let HttpStatePorts {
            users,
            sessions,
            babies,
            records,
            invites,
            reminders,
            identity,
            clock,
        } = ports;
        let policy = AccessPolicy::new(babies.clone());
        Self {
            authenticator: SessionAuthenticator::new(sessions.clone(), users.clone(), clock.clone()),
            login: LoginService::new(identity, users.clone(), sessions, clock.clone())
                .with_ttl(session.ttl),
            babies: BabyProfileService::new(babies.clone(), clock.clone()),
            activities: ActivityService::new(policy.clone(), records.clone(), clock.clone()),
            aggregation: AggregationService::new(policy.clone(), records.clone(), clock.clone()),
            prediction: SleepPredictionService::new(policy.clone(), records, clock.clone()),
            sharing: SharingService::new(babies, users, invites, clock.clone()),
            reminders: ReminderService::new(policy, reminders, clock),
            cookie: session.cookie,
        }
    }
}
