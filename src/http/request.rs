//! Request identity and context capture.
//!
//! The request ID is added as early as possible so every later stage and
//! log line can correlate. `RequestContext` is the snapshot the terminal
//! error stage logs when a handler fails.

use axum::extract::{ConnectInfo, Request};
use axum::http::{header, HeaderValue, Method};
use serde_json::Value;
use std::net::SocketAddr;
use tower_http::request_id::{MakeRequestId, RequestId};

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates UUID v4 request IDs for `SetRequestIdLayer`.
#[derive(Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Snapshot of a request for error reporting.
///
/// Captured before dispatch; holds nothing that outlives the request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    pub url: String,
    pub path: String,
    pub ip: String,
    pub user_agent: String,
    pub request_id: String,
    pub query: Value,
    pub body: Option<Value>,
}

impl RequestContext {
    pub fn capture(request: &Request) -> Self {
        Self {
            method: request.method().clone(),
            url: request.uri().to_string(),
            path: request.uri().path().to_string(),
            ip: client_ip(request),
            user_agent: header_str(request, header::USER_AGENT.as_str()),
            request_id: header_str(request, X_REQUEST_ID),
            query: query_to_json(request.uri().query().unwrap_or("")),
            body: request
                .extensions()
                .get::<crate::http::middleware::body::ParsedBody>()
                .map(|parsed| parsed.0.clone()),
        }
    }
}

/// Client IP as seen on the accepted connection.
pub fn client_ip(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// A header value as a string, or "unknown".
pub fn header_str(request: &Request, name: &str) -> String {
    request
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Decode a raw query string into a JSON object of string values.
pub fn query_to_json(raw: &str) -> Value {
    let map: serde_json::Map<String, Value> = url::form_urlencoded::parse(raw.as_bytes())
        .map(|(key, value)| (key.into_owned(), Value::String(value.into_owned())))
        .collect();
    Value::Object(map)
}
