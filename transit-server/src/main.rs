use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use transit_server::config::AppConfig;
use transit_server::store::{Snapshot, TransitStore};
use transit_server::system::TransportSystem;
use transit_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    // Seed the store from a snapshot if one is configured
    let store = match &config.snapshot_path {
        Some(path) if !path.exists() => {
            warn!(path = %path.display(), "snapshot not found; starting with an empty network");
            TransitStore::new()
        }
        Some(path) => {
            let snapshot = Snapshot::load(path)?;
            let store = TransitStore::from_snapshot(snapshot)?;
            info!(
                path = %path.display(),
                stops = store.stop_count(),
                routes = store.route_count(),
                "loaded snapshot"
            );
            store
        }
        None => {
            warn!("no snapshot configured (set TRANSIT_SNAPSHOT); starting with an empty network");
            TransitStore::new()
        }
    };

    let system = TransportSystem::new(store, &config);
    let app = create_router(AppState::new(system.clone()));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "transit server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
        })
        .await?;

    // Persist writes made over HTTP so the next start sees them
    if let Some(path) = &config.snapshot_path {
        system.save_snapshot(path).await?;
    }

    info!("shut down");
    Ok(())
}
