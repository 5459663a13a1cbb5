//! Contacts entry-point: reads settings, loads the contacts file and serves
//! the contact pages.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use contacts::config::AppSettings;
use contacts::inbound::http::health::HealthState;
use contacts::outbound::InMemoryContactStore;
use server::{ServerConfig, create_server};

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

    let settings = AppSettings::from_env(&DefaultEnv::new()).map_err(|err| {
        error!(error = %err, "invalid configuration");
        std::io::Error::other(err)
    })?;

    let store = InMemoryContactStore::load(&settings.contacts_file, settings.store).map_err(|err| {
        error!(error = %err, path = %settings.contacts_file.display(), "failed to load contacts");
        std::io::Error::other(err)
    })?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(Arc::new(store), settings.bind_addr, settings.cookie_secure);
    let server = create_server(health_state, config)?;
    info!(addr = %settings.bind_addr, "contacts server listening");
    server.await
}
