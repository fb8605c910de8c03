//! Startup gating.
//!
//! The inherited contract: the listener binds only outside production.
//! What serves traffic in production is unresolved upstream; `main` logs a
//! loud warning instead of silently exiting when the gate is closed.

use crate::config::ServerConfig;

/// Whether this process should bind a listener at all.
pub fn listener_enabled(config: &ServerConfig) -> bool {
    !config.environment.is_production()
}
