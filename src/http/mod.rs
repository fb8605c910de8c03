//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, ordered middleware stack)
//!     → middleware/ (headers, cors, body, cookies, shield, access log)
//!     → handlers.rs (root route, 404 fallback)
//!     → middleware/errors.rs (terminal error stage)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod request;
pub mod server;

pub use error::ServerError;
pub use request::{RequestContext, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
