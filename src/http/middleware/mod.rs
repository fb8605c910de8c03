//! Request pipeline stages.
//!
//! Each stage either passes the request forward or short-circuits with its
//! own response. Ordering is fixed in `server::build_router`:
//!
//! ```text
//! body.rs        parse JSON / urlencoded bodies, reject malformed input
//! cookies.rs     Cookie header → name/value map
//! access_log.rs  one structured line per completed request
//! errors.rs      terminal stage: ServerError → logged 500 JSON
//! ```
//!
//! Security-owned stages (headers, shield) live under `crate::security`.

pub mod access_log;
pub mod body;
pub mod cookies;
pub mod errors;
