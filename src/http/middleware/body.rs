//! Request body parsing.
//!
//! Buffers and parses `application/json` and
//! `application/x-www-form-urlencoded` bodies before routing. Malformed
//! JSON never reaches a handler; the raw bytes are restored afterwards so
//! extractors downstream still work.

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use crate::http::error::ErrorBody;
use crate::http::server::AppState;

/// Parsed request body, attached to the request extensions for downstream
/// stages (handlers, error-context logging).
#[derive(Debug, Clone)]
pub struct ParsedBody(pub Value);

enum BodyKind {
    Json,
    Form,
}

pub async fn parse_body(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();

    let kind = if content_type.starts_with("application/json") {
        BodyKind::Json
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        BodyKind::Form
    } else {
        return next.run(request).await;
    };

    let (parts, body) = request.into_parts();
    let bytes = match to_bytes(body, state.config.security.max_body_size).await {
        Ok(bytes) => bytes,
        Err(_) => {
            return (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(ErrorBody::new("Request body too large")),
            )
                .into_response();
        }
    };

    let parsed = match kind {
        BodyKind::Json if bytes.is_empty() => None,
        BodyKind::Json => match serde_json::from_slice::<Value>(&bytes) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::debug!(%error, "Rejected malformed JSON body");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorBody::new("Invalid JSON payload")),
                )
                    .into_response();
            }
        },
        BodyKind::Form if bytes.is_empty() => None,
        BodyKind::Form => Some(form_to_json(&bytes)),
    };

    let mut request = Request::from_parts(parts, Body::from(bytes));
    if let Some(value) = parsed {
        request.extensions_mut().insert(ParsedBody(value));
    }

    next.run(request).await
}

/// Decode a urlencoded form body into a JSON object of string values.
fn form_to_json(bytes: &[u8]) -> Value {
    let map: serde_json::Map<String, Value> = url::form_urlencoded::parse(bytes)
        .map(|(key, value)| (key.into_owned(), Value::String(value.into_owned())))
        .collect();
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_to_json() {
        let value = form_to_json(b"name=server&count=2");
        assert_eq!(value["name"], "server");
        assert_eq!(value["count"], "2");
    }

    #[test]
    fn test_form_to_json_decodes_plus_as_space() {
        let value = form_to_json(b"greeting=hello+world");
        assert_eq!(value["greeting"], "hello world");
    }
}
