//! Abuse and bot protection middleware.
//!
//! Two checks, both keyed off the protection credential: a user-agent
//! screen for obviously automated clients, and a per-IP token bucket for
//! request rate. Without a key the stage passes everything through.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;

use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::config::schema::ProtectionConfig;
use crate::http::error::ErrorBody;
use crate::http::request::client_ip;
use crate::http::server::AppState;
use crate::observability::metrics;

/// User-agent fragments that mark a client as automated.
const AUTOMATED_MARKERS: [&str; 6] = [
    "bot",
    "crawler",
    "spider",
    "scraper",
    "headless",
    "python-requests",
];

/// Whether a user agent matches the automated-client patterns.
///
/// An absent user agent is not treated as automated; plenty of legitimate
/// tooling sends none.
pub fn is_automated(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    AUTOMATED_MARKERS.iter().any(|marker| ua.contains(marker))
}

/// A simple token bucket rate limiter.
struct TokenBucket {
    tokens: f64,
    last_update: Instant,
}

impl TokenBucket {
    fn new(capacity: f64) -> Self {
        Self {
            tokens: capacity,
            last_update: Instant::now(),
        }
    }

    fn try_acquire(&mut self, capacity: f64, refill_rate: f64) -> bool {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update).as_secs_f64();

        // Refill tokens
        self.tokens = (self.tokens + elapsed * refill_rate).min(capacity);
        self.last_update = now;

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

/// Per-IP rate limiter state for the shield.
pub struct ShieldState {
    buckets: Mutex<HashMap<String, TokenBucket>>,
    requests_per_second: f64,
    burst_size: f64,
}

impl ShieldState {
    pub fn new(config: &ProtectionConfig) -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            requests_per_second: f64::from(config.requests_per_second),
            burst_size: f64::from(config.burst_size),
        }
    }

    /// Whether the client identified by `key` is within its rate budget.
    pub fn check(&self, key: &str) -> bool {
        let mut buckets = self.buckets.lock().expect("shield mutex poisoned");
        let bucket = buckets
            .entry(key.to_string())
            .or_insert_with(|| TokenBucket::new(self.burst_size));

        bucket.try_acquire(self.burst_size, self.requests_per_second)
    }
}

/// Middleware function for the abuse/bot protection stage.
pub async fn shield_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if !state.config.protection.enabled() {
        return next.run(request).await;
    }

    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if state.config.protection.block_automated && is_automated(user_agent) {
        tracing::warn!(user_agent = %user_agent, "Blocked automated client");
        metrics::record_shield_rejection("automated");
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorBody::new("Automated traffic detected")),
        )
            .into_response();
    }

    let ip = client_ip(&request);
    if !state.shield.check(&ip) {
        tracing::warn!(client = %ip, "Rate limit exceeded");
        metrics::record_shield_rejection("rate_limit");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ErrorBody::new("Too many requests")),
        )
            .into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_automated_markers() {
        assert!(is_automated("Googlebot/2.1"));
        assert!(is_automated("python-requests/2.31"));
        assert!(is_automated("My-Crawler 1.0"));
        assert!(!is_automated("Mozilla/5.0 (X11; Linux x86_64)"));
        assert!(!is_automated(""));
    }

    #[test]
    fn test_burst_exhaustion() {
        let config = ProtectionConfig {
            key: Some("test".into()),
            requests_per_second: 1,
            burst_size: 3,
            block_automated: true,
        };
        let state = ShieldState::new(&config);

        assert!(state.check("10.0.0.1"));
        assert!(state.check("10.0.0.1"));
        assert!(state.check("10.0.0.1"));
        // Bucket drained; refill over microseconds is far below one token
        assert!(!state.check("10.0.0.1"));
    }

    #[test]
    fn test_buckets_are_per_client() {
        let config = ProtectionConfig {
            key: Some("test".into()),
            requests_per_second: 1,
            burst_size: 1,
            block_automated: true,
        };
        let state = ShieldState::new(&config);

        assert!(state.check("10.0.0.1"));
        assert!(!state.check("10.0.0.1"));
        assert!(state.check("10.0.0.2"));
    }
}
