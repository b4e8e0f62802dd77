//! Service entry-point: loads settings, initialises tracing, and runs the
//! HTTP server.

mod server;

use std::ffi::OsString;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use daybook::inbound::http::session::SessionCookieSettings;
use daybook::inbound::http::state::SessionPolicy;
use daybook::inbound::http::health::HealthState;
use daybook::settings::ServiceSettings;
use server::{ServerConfig, create_server};

/// Translate loaded settings into a server configuration.
fn server_config(settings: &ServiceSettings) -> std::io::Result<ServerConfig> {
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let identity_endpoint = settings
        .identity_provider_url()
        .map_err(std::io::Error::other)?;
    let session = SessionPolicy {
        ttl: settings.session_ttl().map_err(std::io::Error::other)?,
        cookie: SessionCookieSettings {
            secure: settings.cookie_secure(),
            ..SessionCookieSettings::default()
        },
    };
    if !settings.cookie_secure() {
        warn!("session cookie issued without the Secure attribute (development only)");
    }
    let config = ServerConfig::new(bind_addr, identity_endpoint)
        .with_identity_timeout(settings.identity_timeout())
        .with_session_policy(session);

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(server::default_metrics());

    Ok(config)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServiceSettings::load_from_iter(std::env::args_os().collect::<Vec<OsString>>())
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let config = server_config(&settings)?;
    info!(bind_addr = %config.bind_addr(), "starting daybook");

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
