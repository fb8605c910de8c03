//! Cookie parsing.
//!
//! Splits the `Cookie` header into a name→value map attached to the
//! request. Malformed pairs are skipped, never fatal.

use axum::extract::Request;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use std::collections::HashMap;

/// Cookies sent by the client, available to handlers via `Extension`.
#[derive(Debug, Clone, Default)]
pub struct Cookies(pub HashMap<String, String>);

pub async fn parse_cookies(mut request: Request, next: Next) -> Response {
    let cookies = request
        .headers()
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(parse_cookie_header)
        .unwrap_or_default();

    request.extensions_mut().insert(Cookies(cookies));
    next.run(request).await
}

/// Parse a raw `Cookie` header into name/value pairs.
pub fn parse_cookie_header(raw: &str) -> HashMap<String, String> {
    raw.split(';')
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), value.trim().to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cookie_header() {
        let cookies = parse_cookie_header("session=abc123; theme=dark");
        assert_eq!(cookies.get("session").unwrap(), "abc123");
        assert_eq!(cookies.get("theme").unwrap(), "dark");
    }

    #[test]
    fn test_malformed_pairs_skipped() {
        let cookies = parse_cookie_header("valid=1; garbage; =nameless");
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies.get("valid").unwrap(), "1");
    }

    #[test]
    fn test_empty_header() {
        assert!(parse_cookie_header("").is_empty());
    }

    #[test]
    fn test_value_may_contain_equals() {
        let cookies = parse_cookie_header("token=a=b=c");
        assert_eq!(cookies.get("token").unwrap(), "a=b=c");
    }
}
