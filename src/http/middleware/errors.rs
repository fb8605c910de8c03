//! Terminal error stage.
//!
//! Innermost layer of the pipeline: snapshots the request context before
//! dispatch, and if the handler surfaced a `ServerError`, emits the single
//! structured error entry with full request context. The response body was
//! already built by the pure `error_response` conversion; this stage never
//! rethrows and never rewrites a successful response.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::http::error::ServerError;
use crate::http::request::RequestContext;

pub async fn handle_errors(request: Request, next: Next) -> Response {
    let context = RequestContext::capture(&request);

    let response = next.run(request).await;

    if let Some(error) = response.extensions().get::<ServerError>() {
        tracing::error!(
            error.kind = error.kind(),
            error.message = %error,
            method = %context.method,
            url = %context.url,
            path = %context.path,
            ip = %context.ip,
            user_agent = %context.user_agent,
            request_id = %context.request_id,
            query = %context.query,
            body = ?context.body,
            "Unhandled error"
        );
    }

    response
}
