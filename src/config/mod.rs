//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → optional TOML file (SERVER_CONFIG)
//!     → loader.rs (environment overrides: PORT, HOST, NODE_ENV, ...)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is constructed once at process entry and injected; no module
//!   reads the environment after startup
//! - All fields have defaults so an empty environment still boots
//! - Validation separates syntactic (serde) from semantic checks and
//!   reports every violation, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::Environment;
pub use schema::ServerConfig;
