//! Lake Dillon Store Server
//!
//! Hosts the trip's JSON documents and photo objects so every device sees
//! the same plan.
//!
//! # Configuration
//!
//! Environment variables:
//! - `LAKE_DILLON_PORT`: Port to listen on (default: 8080)
//! - `LAKE_DILLON_DATA_DIR`: Directory for documents and objects
//!   (default: ~/.local/share/lake-dillon-server)
//! - `LAKE_DILLON_PUBLIC_URL`: Base URL embedded in photo URLs
//!   (default: http://localhost:<port>)

use std::net::SocketAddr;

use lake_dillon::{router, AppState, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lake_dillon=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    for dir in [config.documents_dir(), config.objects_dir()] {
        if let Err(e) = std::fs::create_dir_all(&dir) {
            tracing::error!("Failed to create {}: {}", dir.display(), e);
            std::process::exit(1);
        }
    }

    tracing::info!("Data directory: {}", config.data_dir.display());
    tracing::info!("Public URL: {}", config.public_url);

    let app = router(AppState::new(&config));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
