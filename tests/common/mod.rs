//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use api_server::config::ServerConfig;
use api_server::http::{AppState, HttpServer};
use api_server::lifecycle::Shutdown;
use axum::Router;

/// Start a server on an ephemeral port with the given configuration.
///
/// The returned `Shutdown` must be kept alive for the lifetime of the
/// test; dropping it stops the server.
#[allow(dead_code)]
pub async fn start_server(config: ServerConfig) -> (SocketAddr, Shutdown) {
    start_server_with_routes(config, Router::new()).await
}

/// Start a server with extra routes merged into the router.
#[allow(dead_code)]
pub async fn start_server_with_routes(
    config: ServerConfig,
    extra: Router<AppState>,
) -> (SocketAddr, Shutdown) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    let server = HttpServer::with_routes(config, extra);

    tokio::spawn(async move {
        let _ = server.run(listener, receiver).await;
    });

    // Give the accept loop a moment to spin up
    tokio::time::sleep(Duration::from_millis(50)).await;

    (addr, shutdown)
}

/// Non-pooled client so each request opens a fresh connection.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
