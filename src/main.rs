//! Record service binary.
//!
//! Loads `.env`, initialises tracing, opens the configured record store,
//! and serves the HTTP API until SIGINT or SIGTERM.

use docket::{
    config::AppConfig,
    http::build_router,
    record::{adapters::RecordStore, services::RecordService},
    telemetry,
};
use mockable::DefaultClock;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // A missing .env file is not an error.
    let _dotenv = dotenvy::dotenv();
    telemetry::init()?;

    let config = AppConfig::from_env()?;
    tracing::info!(
        storage_mode = ?config.storage.mode(),
        static_dir = %config.http.static_dir.display(),
        "configuration loaded"
    );

    let store = RecordStore::open(&config.storage).await?;
    let service = RecordService::new(store.repository(), Arc::new(DefaultClock));
    let router = build_router(service, &config.http);

    let address = config.http.socket_addr()?;
    let listener = TcpListener::bind(address).await?;
    tracing::info!(address = %listener.local_addr()?, "listening");

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    store.close();
    served?;
    tracing::info!("server shutdown complete");
    Ok(())
}

/// Completes when SIGINT or, on Unix, SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
