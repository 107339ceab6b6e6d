//! API Gateway
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────┐
//!                         │                 GATEWAY                  │
//!     Client Request      │  ┌─────────┐    ┌──────────────┐         │
//!     ────────────────────┼─▶│  http   │───▶│ route table  │         │
//!                         │  │ server  │    └──────┬───────┘         │
//!                         │  └─────────┘           │                 │
//!                         │             local ◀────┴────▶ proxy ─────┼──▶ auth-service
//!                         │        (index, health,         │         │
//!                         │           posts)               └─────────┼──▶ image-storage-service
//!     Client Response     │                                          │
//!     ◀───────────────────┼── status + body relayed unchanged        │
//!                         └──────────────────────────────────────────┘
//! ```

use api_gateway::config;
use api_gateway::lifecycle::{signals, Shutdown};
use api_gateway::observability::{logging, metrics};
use api_gateway::HttpServer;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    tracing::info!("api-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    let config = config::load_from_env()?;

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        auth_url = %config.services.auth_url,
        image_url = %config.services.image_url,
        timeout_secs = config.proxy.timeout_secs,
        localization = config.localization.enabled,
        "Configuration loaded"
    );

    let listener = match TcpListener::bind(config.listener.bind_address()).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(
                bind_address = %config.listener.bind_address(),
                error = %e,
                "Failed to bind listener"
            );
            return Err(e.into());
        }
    };

    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
