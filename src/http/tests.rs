//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use crate::types::BackoffType;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(base_url)
        .no_rate_limit()
        .build();
    HttpClient::with_config(config).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(15));
    assert_eq!(config.max_retries, 0);
    assert!(config.base_url.is_none());
    assert!(config.rate_limit.is_some());
    assert!(config.user_agent.starts_with("jetpager/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://blog.example.com")
        .timeout(Duration::from_secs(5))
        .max_retries(2)
        .backoff(
            BackoffType::Linear,
            Duration::from_millis(200),
            Duration::from_secs(3),
        )
        .header("Accept", "application/json")
        .user_agent("theme-test/1.0")
        .build();

    assert_eq!(config.base_url, Some("https://blog.example.com".to_string()));
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.max_retries, 2);
    assert_eq!(config.backoff_type, BackoffType::Linear);
    assert_eq!(
        config.default_headers.get("Accept"),
        Some(&"application/json".to_string())
    );
    assert_eq!(config.user_agent, "theme-test/1.0");
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("alt", "json")
        .query("max-results", 10)
        .header("X-Request-Id", "abc123")
        .timeout(Duration::from_secs(10))
        .retries(1);

    assert_eq!(
        config.query,
        vec![
            ("alt".to_string(), "json".to_string()),
            ("max-results".to_string(), "10".to_string()),
        ]
    );
    assert_eq!(config.timeout, Some(Duration::from_secs(10)));
    assert_eq!(config.max_retries, Some(1));
}

#[tokio::test]
async fn test_http_client_get_json_with_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feeds/posts/summary/"))
        .and(query_param("alt", "json"))
        .and(query_param("max-results", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "feed": {"openSearch$totalResults": {"$t": "12"}}
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let config = RequestConfig::new().query("alt", "json").query("max-results", 1);
    let body: serde_json::Value = client
        .get_json("/feeds/posts/summary/", config)
        .await
        .unwrap();

    assert_eq!(body["feed"]["openSearch$totalResults"]["$t"], "12");
}

#[tokio::test]
async fn test_http_client_default_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feeds"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .header("Accept", "application/json")
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let response = client.get("/feeds").await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_404_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feeds/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let err = client.get("/feeds/missing").await.unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
}

#[tokio::test]
async fn test_http_client_no_retry_by_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feeds/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let err = client.get("/feeds/flaky").await.unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn test_http_client_retry_on_500_when_enabled() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feeds/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/feeds/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .max_retries(3)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_secs(1),
        )
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config).unwrap();
    let response = client.get("/feeds/flaky").await.unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_client_error_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feeds/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such blog"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .max_retries(3)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_secs(1),
        )
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config).unwrap();
    let err = client.get("/feeds/gone").await.unwrap_err();

    assert!(!err.is_retryable());
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "no such blog");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_http_client_rate_limited_without_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feeds/limited"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let err = client.get("/feeds/limited").await.unwrap_err();

    assert!(matches!(
        err,
        Error::RateLimited {
            retry_after_seconds: 7
        }
    ));
}

#[tokio::test]
async fn test_http_client_invalid_json_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feeds/html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let err = client
        .get_json::<serde_json::Value>("/feeds/html", RequestConfig::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode { .. }));
}

#[tokio::test]
async fn test_http_client_full_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/feeds/test"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder().no_rate_limit().build();
    let client = HttpClient::with_config(config).unwrap();

    let response = client
        .get(&format!("{}/feeds/test", mock_server.uri()))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[test]
fn test_calculate_backoff() {
    let backoff = |backoff_type| {
        let config = HttpClientConfig::builder()
            .backoff(
                backoff_type,
                Duration::from_millis(100),
                Duration::from_millis(500),
            )
            .no_rate_limit()
            .build();
        HttpClient::with_config(config).unwrap()
    };

    let constant = backoff(BackoffType::Constant);
    assert_eq!(constant.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(constant.calculate_backoff(3), Duration::from_millis(100));

    let linear = backoff(BackoffType::Linear);
    assert_eq!(linear.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(linear.calculate_backoff(2), Duration::from_millis(300));

    let exponential = backoff(BackoffType::Exponential);
    assert_eq!(exponential.calculate_backoff(1), Duration::from_millis(200));
    assert_eq!(exponential.calculate_backoff(5), Duration::from_millis(500));
}

#[test]
fn test_http_client_debug() {
    let client = HttpClient::new().unwrap();
    let debug = format!("{client:?}");
    assert!(debug.contains("HttpClient"));
    assert!(debug.contains("has_rate_limiter: true"));
}
