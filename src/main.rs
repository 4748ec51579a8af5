//! Entity Relations Server - Binary Entry Point
//!
//! This is the main entry point for the entities-server binary.

use std::error::Error;
use std::fs;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::prelude::*;

use entity_relations::api::{create_router, AppState};
use entity_relations::conflict::AcceptAllChecker;
use entity_relations::handler::Collaborators;
use entity_relations::repository::{InMemoryEntityRepository, InMemoryHostDirectory};
use entity_relations::store::JsonlRelationStore;
use entity_relations::utils::cleanup_temp_files;
use entity_relations::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "entity_relations=info,entities_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    fs::create_dir_all(config.data_dir())?;

    // Leftovers of writes interrupted by a crash
    let removed = cleanup_temp_files(config.data_dir())?;
    if removed > 0 {
        warn!(removed, "Removed stale temp files from data directory");
    }

    let store = JsonlRelationStore::open(config.relations_path())?;
    let entities = InMemoryEntityRepository::load_from_file(config.entities_path())?;
    let hosts = InMemoryHostDirectory::load_from_file(config.hosts_path())?;

    warn!("No availability calculator configured, every entity is reported as available");
    let deps = Collaborators::new(
        Arc::new(store),
        Arc::new(entities),
        Arc::new(AcceptAllChecker),
        Arc::new(hosts),
    );
    let state = Arc::new(AppState::new(deps, config.host_kinds.clone()));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.http_addr).await?;
    info!(
        addr = %config.http_addr,
        data_dir = %config.data_dir().display(),
        version = entity_relations::VERSION,
        "Entity relations server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
