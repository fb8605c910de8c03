//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → headers.rs (security response headers on every reply)
//!     → shield.rs (automated-client check, per-IP rate limits)
//!     → Pass to routing
//! ```
//!
//! # Design Decisions
//! - Shield is inert without a protection key; no key, no checks
//! - Fail closed: a client over budget is rejected, not queued
//! - No trust in client input

pub mod headers;
pub mod shield;
