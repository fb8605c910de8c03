//! Observability subsystem.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber from config (logging.rs)
//! - Record request metrics and expose them via Prometheus (metrics.rs)
//!
//! # Design Decisions
//! - Structured logging everywhere via the tracing crate
//! - JSON format for production, pretty format for development
//! - Metrics exporter runs on its own address, off by default

pub mod logging;
pub mod metrics;
