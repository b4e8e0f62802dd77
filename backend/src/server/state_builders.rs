//! Wiring of storage, identity, and clock adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;

use daybook::inbound::http::state::{HttpState, HttpStatePorts};
use daybook::outbound::identity::HttpIdentityProvider;
use daybook::outbound::memory::MemoryStore;

use super::ServerConfig;

/// Bundle every driven port over one shared in-memory store.
fn build_ports(
    store: Arc<MemoryStore>,
    identity: HttpIdentityProvider,
) -> HttpStatePorts {
    HttpStatePorts {
        users: store.clone(),
        sessions: store.clone(),
        babies: store.clone(),
        records: store.clone(),
        invites: store.clone(),
        reminders: store,
        identity: Arc::new(identity),
        clock: Arc::new(mockable::DefaultClock),
    }
}

/// Build the shared HTTP state for the configured identity endpoint.
///
/// # Errors
/// Returns [`std::io::Error`] when the identity provider client cannot be
/// constructed.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let identity =
        HttpIdentityProvider::new(config.identity_endpoint.clone(), config.identity_timeout)
            .map_err(|err| {
                std::io::Error::other(format!("identity provider client setup failed: {err}"))
            })?;
    let ports = build_ports(Arc::new(MemoryStore::new()), identity);
    Ok(web::Data::new(HttpState::new(ports, config.session)))
}
