//! Route handlers.
//!
//! The whole routing surface of this service: a root greeting and a JSON
//! 404 for everything else. Unmatched methods on `/` also fall through to
//! the 404 handler rather than a 405.

use axum::http::StatusCode;
use axum::Json;

use crate::http::error::ErrorBody;

/// `GET /`
pub async fn root() -> &'static str {
    "Hello from server"
}

/// Fallback for any unmatched path or method.
pub async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("Route not found")))
}
