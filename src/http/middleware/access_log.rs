//! Access logging.
//!
//! One structured log line per completed request, emitted after the
//! response is produced so the final status and latency are known. Also
//! feeds the request metrics.

use axum::extract::Request;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;

use crate::http::request::{client_ip, header_str, X_REQUEST_ID};
use crate::observability::metrics;

pub async fn log_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();

    let method = request.method().clone();
    let target = request.uri().to_string();
    let ip = client_ip(&request);
    let user_agent = header_str(&request, header::USER_AGENT.as_str());
    let request_id = header_str(&request, X_REQUEST_ID);

    let response = next.run(request).await;
    let status = response.status().as_u16();

    tracing::info!(
        %method,
        target = %target,
        status,
        latency_ms = start.elapsed().as_millis() as u64,
        ip = %ip,
        user_agent = %user_agent,
        request_id = %request_id,
        "Request completed"
    );

    metrics::record_request(method.as_str(), status, start);

    response
}
