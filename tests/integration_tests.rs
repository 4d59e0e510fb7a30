//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: request → reqwest transport → paginated
//! responses → merged document

use paginated_http::config::{ClientConfig, HttpClientConfig, PaginationConfig};
use paginated_http::http::{ReqwestTransport, Request, Transport};
use paginated_http::pagination::{PaginatingClient, PaginatingTransport};
use paginated_http::Error;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn paginating() -> PaginatingTransport<ReqwestTransport> {
    PaginatingTransport::new(ReqwestTransport::new().unwrap())
}

fn next_link(url: &str) -> String {
    format!(r#"<{url}>; rel="next", <{url}>; rel="last""#)
}

// ============================================================================
// Pagination Integration Tests
// ============================================================================

#[tokio::test]
async fn test_three_pages_are_merged() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/repos/owner/repo/issues"))
        .and(query_param("per_page", "100"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 1}, {"id": 2}]))
                .insert_header(
                    "link",
                    next_link(&format!("{base}/repos/owner/repo/issues?page=2&per_page=100")),
                ),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/owner/repo/issues"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 3}]))
                .insert_header(
                    "link",
                    next_link(&format!("{base}/repos/owner/repo/issues?page=3&per_page=100")),
                ),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/owner/repo/issues"))
        .and(query_param("page", "3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 4}]))
                .insert_header("x-ratelimit-remaining", "4997"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = paginating()
        .round_trip(Request::get(&format!("{base}/repos/owner/repo/issues")).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-ratelimit-remaining").unwrap(),
        "4997"
    );
    let declared = response.content_length().unwrap();
    let body = response.bytes().await.unwrap();
    assert_eq!(declared, body.len() as u64);

    let merged: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(merged, json!([{"id": 1}, {"id": 2}, {"id": 3}, {"id": 4}]));
}

#[tokio::test]
async fn test_object_pages_are_deep_merged() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "total_count": 3,
                    "incomplete_results": false,
                    "items": [{"id": 1}, {"id": 2}]
                }))
                .insert_header(
                    "link",
                    next_link(&format!("{base}/search/issues?q=bug&page=2")),
                ),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 3,
            "incomplete_results": true,
            "items": [{"id": 3}]
        })))
        .mount(&mock_server)
        .await;

    let response = paginating()
        .round_trip(Request::get(&format!("{base}/search/issues?q=bug")).unwrap())
        .await
        .unwrap();
    let merged: Value = response.json().await.unwrap();

    assert_eq!(
        merged,
        json!({
            "total_count": 3,
            "incomplete_results": true,
            "items": [{"id": 1}, {"id": 2}, {"id": 3}]
        })
    );
}

#[tokio::test]
async fn test_existing_page_size_is_preserved() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("per_page", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2, 3])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = paginating()
        .round_trip(Request::get(&format!("{}/items?per_page=50", mock_server.uri())).unwrap())
        .await
        .unwrap();

    let items: Vec<u32> = response.json().await.unwrap();
    assert_eq!(items, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_relative_next_link() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param_is_missing("cursor"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!(["a"]))
                .insert_header("link", r#"</items?cursor=abc>; rel="next""#),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .and(query_param("cursor", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["b"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = paginating()
        .round_trip(Request::get(&format!("{}/items", mock_server.uri())).unwrap())
        .await
        .unwrap();

    let items: Value = response.json().await.unwrap();
    assert_eq!(items, json!(["a", "b"]));
}

#[tokio::test]
async fn test_request_headers_are_sent_to_every_page() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/private"))
        .and(header("authorization", "Bearer test-token"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([1]))
                .insert_header("link", next_link(&format!("{base}/private?page=2"))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/private"))
        .and(header("authorization", "Bearer test-token"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([2])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = Request::get(&format!("{base}/private"))
        .unwrap()
        .try_header("Authorization", "Bearer test-token")
        .unwrap();
    let response = paginating().round_trip(request).await.unwrap();

    let items: Value = response.json().await.unwrap();
    assert_eq!(items, json!([1, 2]));
}

// ============================================================================
// Passthrough Integration Tests
// ============================================================================

#[tokio::test]
async fn test_post_is_not_paginated() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("POST"))
        .and(path("/items"))
        .and(body_json(json!({"name": "new"})))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"id": 9}))
                .insert_header("link", next_link(&format!("{base}/items?page=2"))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = Request::parse(Method::POST, &format!("{base}/items"))
        .unwrap()
        .json(&json!({"name": "new"}))
        .unwrap();
    let response = paginating().round_trip(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.headers().contains_key("link"));
    let created: Value = response.json().await.unwrap();
    assert_eq!(created, json!({"id": 9}));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].url.as_str().contains("per_page"));
}

#[tokio::test]
async fn test_text_response_is_not_paginated() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/readme"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("# Title\n", "text/markdown")
                .insert_header("link", next_link(&format!("{base}/readme?page=2"))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = paginating()
        .round_trip(Request::get(&format!("{base}/readme")).unwrap())
        .await
        .unwrap();

    assert_eq!(response.media_type().as_deref(), Some("text/markdown"));
    assert_eq!(response.text().await.unwrap(), "# Title\n");
}

#[tokio::test]
async fn test_error_status_passes_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&mock_server)
        .await;

    let response = paginating()
        .round_trip(Request::get(&format!("{}/missing", mock_server.uri())).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Not Found");
}

// ============================================================================
// Failure Integration Tests
// ============================================================================

#[tokio::test]
async fn test_link_cycle_is_aborted() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/loop"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([1]))
                .insert_header("link", next_link(&format!("{base}/loop?page=2"))),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/loop"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([2]))
                .insert_header("link", next_link(&format!("{base}/loop?page=2"))),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = paginating()
        .round_trip(Request::get(&format!("{base}/loop")).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::PaginationCycle { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_page_limit_from_yaml_config() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/endless"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([0]))
                .insert_header("link", next_link(&format!("{base}/endless?page=next"))),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::from_yaml_str(
        r"
pagination:
  max_pages: 2
  detect_cycles: false
",
    )
    .unwrap();
    let transport = PaginatingTransport::with_config(
        ReqwestTransport::with_config(&config.http).unwrap(),
        config.pagination,
    );

    let err = transport
        .round_trip(Request::get(&format!("{base}/endless")).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::PageLimitExceeded { max_pages: 2 }));
}

#[tokio::test]
async fn test_slow_page_times_out() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/slow"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([1]))
                .insert_header("link", next_link(&format!("{base}/slow?page=2"))),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([2]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let err = paginating()
        .round_trip_with_timeout(
            Request::get(&format!("{base}/slow")).unwrap(),
            Duration::from_millis(300),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Timeout { timeout_ms: 300 }));
}

#[tokio::test]
async fn test_invalid_json_page() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("[1, 2", "application/json")
                .insert_header("link", next_link(&format!("{base}/broken?page=2"))),
        )
        .mount(&mock_server)
        .await;

    let err = paginating()
        .round_trip(Request::get(&format!("{base}/broken")).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_connection_refused() {
    let err = paginating()
        .round_trip(Request::get("http://127.0.0.1:9/items").unwrap())
        .await
        .unwrap_err();
    assert!(err.is_transport());
}

// ============================================================================
// Client Integration Tests
// ============================================================================

#[tokio::test]
async fn test_client_collects_pages_and_sends_default_headers() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .and(header("accept", "application/vnd.github+json"))
        .and(query_param("per_page", "30"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"name": "anvil"}]))
                .insert_header(
                    "link",
                    next_link(&format!("{base}/orgs/acme/repos?per_page=30&page=2")),
                ),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "rocket"}])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig {
        pagination: PaginationConfig::new().page_size(30),
        http: HttpClientConfig::builder()
            .header("Accept", "application/vnd.github+json")
            .build(),
    };
    let client = PaginatingClient::from_config(&base, &config).unwrap();

    let repos: Vec<Value> = client.get("/orgs/acme/repos").await.unwrap().unwrap();
    let names: Vec<&str> = repos.iter().filter_map(|r| r["name"].as_str()).collect();
    assert_eq!(names, vec!["anvil", "rocket"]);
}

#[tokio::test]
async fn test_client_delete_no_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/repos/owner/repo"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client =
        PaginatingClient::from_config(&mock_server.uri(), &ClientConfig::default()).unwrap();
    let result: Option<Value> = client.delete("/repos/owner/repo").await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_client_put_and_patch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/user/starred/owner/repo"))
        .and(body_json(json!({"starred": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/repos/owner/repo"))
        .and(body_json(json!({"private": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"private": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client =
        PaginatingClient::from_config(&mock_server.uri(), &ClientConfig::default()).unwrap();

    let put: Value = client
        .put("/user/starred/owner/repo", &json!({"starred": true}))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(put["ok"], true);

    let patched: Value = client
        .patch("/repos/owner/repo", &json!({"private": true}))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(patched["private"], true);
}

#[tokio::test]
async fn test_client_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forbidden"))
        .respond_with(ResponseTemplate::new(403).set_body_string("rate limited"))
        .mount(&mock_server)
        .await;

    let client =
        PaginatingClient::from_config(&mock_server.uri(), &ClientConfig::default()).unwrap();
    let err = client.get::<Value>("/forbidden").await.unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "rate limited");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}
