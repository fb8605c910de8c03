//! HTTP Server Bootstrap
//!
//! A minimal production HTTP entry point built with Tokio and Axum.
//!
//! # Request Pipeline
//!
//! ```text
//!     Client Request
//!         │
//!         ▼
//!     ┌──────────────────────────────────────────────┐
//!     │ request id      x-request-id (UUID v4)       │
//!     │ trace           span per request             │
//!     │ sec. headers    nosniff, frame deny, ...     │
//!     │ cors            cross-origin policy          │
//!     │ body limit      reject oversized bodies      │
//!     │ body parsing    JSON + urlencoded forms      │
//!     │ cookies         Cookie header → map          │
//!     │ shield          bot + rate-limit checks      │
//!     │ access log      one line per request         │
//!     │ error stage     ServerError → 500 JSON       │
//!     └──────────────────────────────────────────────┘
//!         │
//!         ▼
//!     GET /  → 200 "Hello from server"
//!     other  → 404 {"error":"Route not found"}
//! ```
//!
//! Configuration is read once at startup (environment over optional TOML
//! file) and injected into the server; nothing reads the environment after
//! that point.

use api_server::config::load_config;
use api_server::http::HttpServer;
use api_server::lifecycle::{signals, startup, Shutdown};
use api_server::observability::{logging, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration first so logging can be set up from it
    let config = load_config()?;

    logging::init(&config.observability);

    tracing::info!(
        environment = %config.environment,
        port = config.listener.port,
        shield_enabled = config.protection.enabled(),
        "Configuration loaded"
    );

    // The inherited startup contract only binds a listener outside
    // production; the production entry point is still unspecified.
    if !startup::listener_enabled(&config) {
        tracing::warn!(
            environment = %config.environment,
            "Listener disabled in this environment; no production entry point is configured"
        );
        return Ok(());
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => {
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    "Failed to parse metrics address"
                );
            }
        }
    }

    let listener = tokio::net::TcpListener::bind(config.listener.bind_address()).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        port = local_addr.port(),
        "Server is up and running"
    );

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    tokio::spawn(signals::trigger_on_signal(shutdown));

    let server = HttpServer::new(config);
    server.run(listener, receiver).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
