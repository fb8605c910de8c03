//! Central error type and response construction.
//!
//! Handlers return `Result<_, ServerError>`; conversion to a response is a
//! pure function so the error contract stays independent of the framework.
//! Logging belongs to the terminal pipeline stage in
//! `middleware::errors`, which sees the full request context.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// JSON error body shared by every error-shaped response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// An error raised during pipeline or handler execution.
///
/// There is deliberately no taxonomy beyond the kind label: anything that
/// reaches the terminal stage is answered with a generic 500.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ServerError {
    kind: &'static str,
    message: String,
}

impl ServerError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: "internal",
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Build the client-facing response for an error.
///
/// Pure function of the error alone; safe to call from any context.
pub fn error_response(error: &ServerError) -> Response {
    let message = if error.message.is_empty() {
        "Internal server error"
    } else {
        error.message()
    };

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new(message)),
    )
        .into_response()
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        // The error rides along in the response extensions so the terminal
        // stage can log it together with the request context.
        let mut response = error_response(&self);
        response.extensions_mut().insert(self);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_status() {
        let response = error_response(&ServerError::internal("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_empty_message_gets_default() {
        let error = ServerError::internal("");
        assert_eq!(error.message(), "");

        // The rendered body falls back to the generic message
        let response = error_response(&error);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_into_response_carries_error() {
        let response = ServerError::internal("boom").into_response();
        let carried = response.extensions().get::<ServerError>().unwrap();
        assert_eq!(carried.message(), "boom");
        assert_eq!(carried.kind(), "internal");
    }
}
