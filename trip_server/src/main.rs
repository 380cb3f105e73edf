//! Trip planner HTTP server.
//!
//! Reads settings from the environment (and `.env`), opens the record store once,
//! serves until Ctrl-C / SIGTERM, then closes the store.

use std::sync::Arc;

use tokio::net::TcpListener;
use trip_planner::{
    app, ensure_database_exists, init_tracing, AppState, MemoryStore, PgStore, RecordStore,
    Settings, StoreBackend, COLLECTIONS,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing();

    let settings = Settings::from_env()?;
    let store = open_store(&settings).await?;
    let state = AppState::new(store.clone());

    let listener = TcpListener::bind(settings.listen_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("shutdown complete");
    Ok(())
}

async fn open_store(settings: &Settings) -> Result<Arc<dyn RecordStore>, Box<dyn std::error::Error>> {
    match settings.backend {
        StoreBackend::Postgres => {
            ensure_database_exists(&settings.database_url).await?;
            let store = PgStore::connect(settings).await?;
            store.ensure_collections(COLLECTIONS).await?;
            tracing::info!(namespace = %settings.namespace, "connected to postgres record store");
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory record store; data is lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
