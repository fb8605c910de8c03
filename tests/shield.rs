//! Protection stage tests: bot screening and per-IP rate limiting.

use api_server::config::ServerConfig;
use serde_json::Value;

mod common;

fn protected_config(requests_per_second: u32, burst_size: u32) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.protection.key = Some("ajkey_test".to_string());
    config.protection.requests_per_second = requests_per_second;
    config.protection.burst_size = burst_size;
    config
}

#[tokio::test]
async fn test_automated_user_agent_blocked() {
    let (addr, _shutdown) = common::start_server(protected_config(100, 100)).await;

    let res = common::client()
        .get(format!("http://{}/", addr))
        .header("user-agent", "EvilBot/1.0")
        .send()
        .await
        .expect("Server unreachable");

    assert_eq!(res.status(), 403);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Automated traffic detected");
}

#[tokio::test]
async fn test_browser_user_agent_allowed() {
    let (addr, _shutdown) = common::start_server(protected_config(100, 100)).await;

    let res = common::client()
        .get(format!("http://{}/", addr))
        .header("user-agent", "Mozilla/5.0 (X11; Linux x86_64)")
        .send()
        .await
        .expect("Server unreachable");

    assert_eq!(res.status(), 200);
}

#[tokio::test]
async fn test_burst_over_budget_rate_limited() {
    let (addr, _shutdown) = common::start_server(protected_config(1, 2)).await;
    let client = common::client();

    let mut statuses = Vec::new();
    for _ in 0..4 {
        let res = client
            .get(format!("http://{}/", addr))
            .header("user-agent", "integration-suite")
            .send()
            .await
            .expect("Server unreachable");
        statuses.push(res.status().as_u16());
    }

    // Burst of two passes, the rest are over budget
    assert_eq!(&statuses[..2], &[200, 200]);
    assert!(statuses[2..].contains(&429));
}

#[tokio::test]
async fn test_rate_limit_body_is_json() {
    let (addr, _shutdown) = common::start_server(protected_config(1, 1)).await;
    let client = common::client();

    let first = client
        .get(format!("http://{}/", addr))
        .send()
        .await
        .expect("Server unreachable");
    assert_eq!(first.status(), 200);

    let second = client
        .get(format!("http://{}/", addr))
        .send()
        .await
        .expect("Server unreachable");
    assert_eq!(second.status(), 429);
    let body: Value = second.json().await.unwrap();
    assert_eq!(body["error"], "Too many requests");
}

#[tokio::test]
async fn test_shield_inert_without_key() {
    // Default config carries no protection key
    let (addr, _shutdown) = common::start_server(ServerConfig::default()).await;
    let client = common::client();

    for _ in 0..20 {
        let res = client
            .get(format!("http://{}/", addr))
            .header("user-agent", "EvilBot/1.0")
            .send()
            .await
            .expect("Server unreachable");
        assert_eq!(res.status(), 200);
    }
}
