//! Tests for the HTTP module

use super::*;
use crate::auth::AuthContext;
use crate::config::{CursorPaginationDef, EndpointDefaults, EndpointDefinition};
use crate::error::Error;
use crate::fetch::PageFetcher;
use crate::types::{Cursor, PageRequest};
use serde_json::json;
use std::collections::BTreeMap;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn endpoint(base_url: &str) -> EndpointDefinition {
    let mut headers = BTreeMap::new();
    headers.insert("X-App-Id".to_string(), "1234".to_string());

    EndpointDefinition {
        name: "followers".to_string(),
        description: String::new(),
        base_url: base_url.to_string(),
        path: "/friendships/{owner}/followers/".to_string(),
        items_path: "users".to_string(),
        pagination: CursorPaginationDef {
            cursor_param: "max_id".to_string(),
            cursor_path: "next_max_id".to_string(),
            page_size_param: "count".to_string(),
        },
        headers,
        defaults: EndpointDefaults::default(),
    }
}

fn fetcher(base_url: &str) -> HttpPageFetcher {
    let client = HttpClient::new().unwrap();
    HttpPageFetcher::with_client(client, endpoint(base_url))
}

// ============================================================================
// HttpClient Tests
// ============================================================================

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.base_url.is_none());
    assert!(config.user_agent.starts_with("cursor-harvest/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.example.com")
        .timeout(Duration::from_secs(5))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.base_url, Some("https://api.example.com".to_string()));
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("count", "12")
        .header("X-Request-Id", "abc123")
        .auth(AuthContext::Bearer {
            token: "t".to_string(),
        })
        .timeout(Duration::from_secs(10));

    assert_eq!(config.query.get("count"), Some(&"12".to_string()));
    assert_eq!(
        config.headers.get("X-Request-Id"),
        Some(&"abc123".to_string())
    );
    assert!(!config.auth.is_none());
    assert_eq!(config.timeout, Some(Duration::from_secs(10)));
}

#[tokio::test]
async fn test_http_client_get_json_with_base_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/data"))
        .and(header("X-Default", "yes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": 42 })))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .header("X-Default", "yes")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let data: serde_json::Value = client
        .get_json_with_config("/api/data", RequestConfig::new())
        .await
        .unwrap();
    assert_eq!(data["value"], 42);
}

#[tokio::test]
async fn test_http_client_status_error_keeps_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "message": "not found", "status": "fail" })),
        )
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().unwrap();
    let err = client
        .get_json_with_config::<serde_json::Value>(
            &format!("{}/api/missing", mock_server.uri()),
            RequestConfig::new(),
        )
        .await
        .unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("not found"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_http_client_rejected_session_is_auth_error() {
    for status in [401_u16, 403] {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(json!({ "message": "login_required", "status": "fail" })),
            )
            .mount(&mock_server)
            .await;

        let client = HttpClient::new().unwrap();
        let err = client
            .get_json_with_config::<serde_json::Value>(&mock_server.uri(), RequestConfig::new())
            .await
            .unwrap_err();

        match &err {
            Error::Auth { message } => {
                assert!(message.contains(&status.to_string()));
                assert!(message.contains("login_required"));
            }
            other => panic!("unexpected error for {status}: {other}"),
        }
        assert!(err.is_page_failure());
    }
}

#[tokio::test]
async fn test_http_client_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().unwrap();
    let config = RequestConfig::new().timeout(Duration::from_millis(50));
    let err = client
        .get_json_with_config::<serde_json::Value>(&format!("{}/slow", mock_server.uri()), config)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Timeout { timeout_ms: 50 }));
}

#[tokio::test]
async fn test_http_client_invalid_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().unwrap();
    let err = client
        .get_json_with_config::<serde_json::Value>(
            &format!("{}/html", mock_server.uri()),
            RequestConfig::new(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::JsonParse(_)));
}

// ============================================================================
// HttpPageFetcher Tests
// ============================================================================

#[test]
fn test_request_config_omits_start_cursor() {
    let fetcher = fetcher("https://api.example.com");
    let request = PageRequest::new("42", 25);

    let first = fetcher.request_config(&request, &Cursor::start());
    assert_eq!(first.query.get("count"), Some(&"25".to_string()));
    assert!(!first.query.contains_key("max_id"));
    assert_eq!(first.headers.get("X-App-Id"), Some(&"1234".to_string()));

    let next = fetcher.request_config(&request, &Cursor::new("QVFD"));
    assert_eq!(next.query.get("max_id"), Some(&"QVFD".to_string()));
}

#[test]
fn test_parse_page_reads_items_and_cursor() {
    let fetcher = fetcher("https://api.example.com");
    let page = fetcher
        .parse_page(&json!({
            "users": [{"pk": "1"}, {"pk": "2"}],
            "next_max_id": "p2"
        }))
        .unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.items[0]["pk"], "1");
    assert_eq!(page.next_cursor, Cursor::new("p2"));
}

#[test]
fn test_parse_page_missing_cursor_is_last_page() {
    let fetcher = fetcher("https://api.example.com");

    let page = fetcher.parse_page(&json!({ "users": [] })).unwrap();
    assert!(!page.has_more());

    let page = fetcher
        .parse_page(&json!({ "users": [], "next_max_id": null }))
        .unwrap();
    assert!(!page.has_more());
}

#[test]
fn test_parse_page_numeric_cursor() {
    let fetcher = fetcher("https://api.example.com");
    let page = fetcher
        .parse_page(&json!({ "users": [], "next_max_id": 100 }))
        .unwrap();
    assert_eq!(page.next_cursor, Cursor::new("100"));
}

#[test]
fn test_parse_page_rejects_odd_cursor() {
    let fetcher = fetcher("https://api.example.com");
    let err = fetcher
        .parse_page(&json!({ "users": [], "next_max_id": {"a": 1} }))
        .unwrap_err();
    assert!(matches!(err, Error::MalformedResponse { .. }));
}

#[test]
fn test_parse_page_missing_items_is_malformed() {
    let fetcher = fetcher("https://api.example.com");

    let err = fetcher
        .parse_page(&json!({ "next_max_id": "p2" }))
        .unwrap_err();
    assert!(err.to_string().contains("missing 'users'"));

    let err = fetcher
        .parse_page(&json!({ "users": "nope" }))
        .unwrap_err();
    assert!(err.to_string().contains("not an array"));
}

#[test]
fn test_parse_page_skips_non_objects() {
    let fetcher = fetcher("https://api.example.com");
    let page = fetcher
        .parse_page(&json!({ "users": [{"pk": "1"}, 7, "x", null, {"pk": "2"}] }))
        .unwrap();
    assert_eq!(page.len(), 2);
}

#[test]
fn test_select_path() {
    let value = json!({ "data": { "paging": { "next": "abc" } }, "list": [1] });
    assert_eq!(select_path(&value, "data.paging.next"), Some(&json!("abc")));
    assert_eq!(select_path(&value, "$.data.paging.next"), Some(&json!("abc")));
    assert_eq!(select_path(&value, "list"), Some(&json!([1])));
    assert_eq!(select_path(&value, "list.0"), None);
    assert_eq!(select_path(&value, "missing"), None);
}

#[tokio::test]
async fn test_fetcher_walks_cursor_param() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/friendships/42/followers/"))
        .and(query_param("max_id", "p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{"pk": "3"}]
        })))
        .with_priority(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/friendships/42/followers/"))
        .and(query_param("count", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{"pk": "1"}, {"pk": "2"}],
            "next_max_id": "p2"
        })))
        .with_priority(5)
        .mount(&mock_server)
        .await;

    let fetcher = fetcher(&mock_server.uri());
    let request = PageRequest::new("42", 2);

    let first = fetcher.fetch(&request, &Cursor::start()).await.unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first.next_cursor, Cursor::new("p2"));

    let second = fetcher.fetch(&request, &first.next_cursor).await.unwrap();
    assert_eq!(second.len(), 1);
    assert!(!second.has_more());
}

#[tokio::test]
async fn test_fetcher_sends_cookies_and_endpoint_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/friendships/42/followers/"))
        .and(header("cookie", "csrftoken=def; sessionid=abc"))
        .and(header("X-App-Id", "1234"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "users": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = PageRequest::new("42", 12)
        .with_auth(AuthContext::from_cookie_string("sessionid=abc; csrftoken=def"));

    let page = fetcher(&mock_server.uri())
        .fetch(&request, &Cursor::start())
        .await
        .unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn test_fetcher_surfaces_status_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Please wait a few minutes"))
        .mount(&mock_server)
        .await;

    let err = fetcher(&mock_server.uri())
        .fetch(&PageRequest::new("42", 12), &Cursor::start())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 429, .. }));
    assert!(err.is_page_failure());
}

#[tokio::test]
async fn test_fetcher_rejects_bad_owner() {
    let err = fetcher("https://api.example.com")
        .fetch(&PageRequest::new("a/b", 12), &Cursor::start())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { .. }));
}

#[tokio::test]
async fn test_fetch_raw_keeps_every_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/friendships/42/followers/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{"pk": "1"}],
            "big_list": true,
            "page_size": 12,
            "next_max_id": "p2",
            "status": "ok"
        })))
        .mount(&mock_server)
        .await;

    let body = fetcher(&mock_server.uri())
        .fetch_raw(&PageRequest::new("42", 12), &Cursor::start())
        .await
        .unwrap();

    assert_eq!(body["big_list"], true);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["next_max_id"], "p2");
}

// ============================================================================
// ProfileLookup Tests
// ============================================================================

#[tokio::test]
async fn test_profile_lookup_sends_username_and_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/web_profile_info/"))
        .and(query_param("username", "zuck"))
        .and(header("cookie", "sessionid=abc"))
        .and(header("X-IG-App-ID", "936619743392459"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "user": { "id": "314216", "username": "zuck" } },
            "status": "ok"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let lookup = ProfileLookup::with_base_url(mock_server.uri()).unwrap();
    let profile = lookup
        .fetch("@zuck", AuthContext::from_cookie_string("sessionid=abc"))
        .await
        .unwrap();

    assert_eq!(ProfileLookup::user_id(&profile), Some("314216"));
    assert_eq!(profile["status"], "ok");
}

#[tokio::test]
async fn test_profile_lookup_expired_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/web_profile_info/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Please wait a few minutes before you try again.",
            "require_login": true,
            "status": "fail"
        })))
        .mount(&mock_server)
        .await;

    let err = ProfileLookup::with_base_url(mock_server.uri())
        .unwrap()
        .fetch("zuck", AuthContext::None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Auth { .. }));
}

#[tokio::test]
async fn test_profile_lookup_rejects_bad_username() {
    let lookup = ProfileLookup::with_base_url("http://127.0.0.1:9").unwrap();

    for username in ["", "  ", "a/b", "a&b=c"] {
        let err = lookup.fetch(username, AuthContext::None).await.unwrap_err();
        assert!(
            matches!(err, Error::InvalidConfigValue { .. }),
            "{username:?} gave {err}"
        );
    }
}

#[test]
fn test_profile_user_id_missing() {
    assert_eq!(ProfileLookup::user_id(&json!({ "data": {} })), None);
    assert_eq!(
        ProfileLookup::user_id(&json!({ "data": { "user": { "id": 5 } } })),
        None
    );
}
