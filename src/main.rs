//! Binary entry point for the campus coffee API server.

use std::sync::Arc;

use actix_web::web;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use campuscoffee::domain::ports::{PosCatalogue, UserDirectory};
use campuscoffee::domain::{Pos, PosCatalogueService, User, UserDirectoryService};
use campuscoffee::inbound::http::health::HealthState;
use campuscoffee::inbound::http::state::AppState;
use campuscoffee::outbound::OsmHttpSource;
use campuscoffee::outbound::memory::InMemoryStore;
use campuscoffee::server::{ServerConfig, create_server};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(error) = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
    {
        warn!(%error, "tracing subscriber already initialised");
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_tracing();
    let config = ServerConfig::parse();

    let osm = OsmHttpSource::new(config.osm_api_base.clone(), config.osm_timeout())
        .map_err(std::io::Error::other)?;

    let users: Arc<dyn UserDirectory> = Arc::new(UserDirectoryService::new(Arc::new(
        InMemoryStore::<User>::new(),
    )));
    let pos: Arc<dyn PosCatalogue> = Arc::new(PosCatalogueService::new(
        Arc::new(InMemoryStore::<Pos>::new()),
        Arc::new(osm),
    ));

    let state = AppState::new(users, pos);
    let health_state = web::Data::new(HealthState::new());

    info!(addr = %config.bind_addr, "starting campus coffee API server");
    create_server(state, health_state, &config)?.await
}
