//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up the ordered middleware stack
//! - Bind server to listener
//! - Serve until a shutdown signal

use axum::http::{HeaderName, HeaderValue};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use axum::extract::DefaultBodyLimit;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnFailure, TraceLayer};
use tracing::Level;

use crate::config::schema::CorsConfig;
use crate::config::ServerConfig;
use crate::http::middleware::{access_log, body, cookies, errors};
use crate::http::request::{UuidRequestId, X_REQUEST_ID};
use crate::http::handlers;
use crate::security::headers::set_security_headers;
use crate::security::shield::{shield_middleware, ShieldState};

/// Application state injected into handlers and stateful middleware.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub shield: Arc<ShieldState>,
}

/// HTTP server for the bootstrap service.
pub struct HttpServer {
    router: Router,
    config: Arc<ServerConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_routes(config, Router::new())
    }

    /// Create a server with additional routes merged in before the
    /// middleware stack is applied. The extra routes pass through the full
    /// pipeline, including the terminal error stage.
    pub fn with_routes(config: ServerConfig, extra: Router<AppState>) -> Self {
        let config = Arc::new(config);
        let shield = Arc::new(ShieldState::new(&config.protection));
        let state = AppState {
            config: config.clone(),
            shield,
        };

        let router = Self::build_router(&config, state, extra);
        Self { router, config }
    }

    /// Build the Axum router with the ordered middleware stack.
    ///
    /// `ServiceBuilder` applies layers top-to-bottom on the request path;
    /// the listed order is the pipeline order.
    fn build_router(config: &ServerConfig, state: AppState, extra: Router<AppState>) -> Router {
        Router::new()
            .route("/", get(handlers::root).fallback(handlers::not_found))
            .merge(extra)
            .fallback(handlers::not_found)
            .with_state(state.clone())
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(
                        HeaderName::from_static(X_REQUEST_ID),
                        UuidRequestId,
                    ))
                    .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                        X_REQUEST_ID,
                    )))
                    .layer(
                        TraceLayer::new_for_http()
                            .on_failure(DefaultOnFailure::new().level(Level::DEBUG)),
                    )
                    .layer(from_fn_with_state(state.clone(), set_security_headers))
                    .layer(cors_layer(&config.cors))
                    .layer(DefaultBodyLimit::max(config.security.max_body_size))
                    .layer(from_fn_with_state(state.clone(), body::parse_body))
                    .layer(from_fn(cookies::parse_cookies))
                    .layer(from_fn_with_state(state, shield_middleware))
                    .layer(from_fn(access_log::log_requests))
                    .layer(from_fn(errors::handle_errors)),
            )
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Build the cross-origin layer from config.
///
/// A `"*"` entry (the default) means any origin; otherwise the listed
/// origins are allowed verbatim.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let wildcard = config.allowed_origins.is_empty()
        || config.allowed_origins.iter().any(|origin| origin == "*");

    if wildcard {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
