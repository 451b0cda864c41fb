//! Transport tests against a local HTTP server.
//!
//! The transport blocks, so each call runs on `spawn_blocking` while the
//! mock server is driven by the multi-thread runtime.

use std::time::Duration;

use vault_core::{BlockingTransport, HttpMethod, HttpRequest, Transport, VaultError};
use vault_json::Value;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn execute(request: HttpRequest) -> Result<vault_core::HttpResponse, VaultError> {
    tokio::task::spawn_blocking(move || BlockingTransport::new().execute(&request))
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_merges_query_and_sends_no_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/secret/data/app"))
        .and(query_param("version", "2"))
        .and(query_param("list", "true"))
        .and(header("X-Vault-Token", "hvs.test"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/json")
                .set_body_string(r#"{"data":{"data":{"password":"hunter2"}}}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request = HttpRequest::new(
        HttpMethod::Get,
        format!("{}/v1/secret/data/app?version=2", server.uri()),
    )
    .query("list", "true")
    .header("X-Vault-Token", "hvs.test");

    let response = execute(request).await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.mime_type(), Some("application/json"));
    let value = response.json().unwrap();
    assert_eq!(
        value.pointer("/data/data/password").unwrap().as_str().unwrap(),
        "hunter2"
    );

    let received = server.received_requests().await.unwrap();
    assert!(received[0].body.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_put_sends_body_with_content_length() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/sys/leases/renew"))
        .and(header("Content-Type", "application/json"))
        .and(body_string(r#"{"lease_id":"db/creds/1","increment":60}"#))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut body = Value::object();
    body.set("lease_id", "db/creds/1").unwrap();
    body.set("increment", 60).unwrap();
    let request = HttpRequest::new(HttpMethod::Put, format!("{}/v1/sys/leases/renew", server.uri()))
        .json(&body);

    let response = execute(request).await.unwrap();
    assert_eq!(response.status(), 204);
    assert_eq!(response.json().unwrap(), Value::Null);

    let received = server.received_requests().await.unwrap();
    let length = received[0].headers.get("content-length").unwrap();
    assert_eq!(length.to_str().unwrap(), "40");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_post_without_body_sends_zero_length() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/sys/seal"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let request = HttpRequest::new(HttpMethod::Post, format!("{}/v1/sys/seal", server.uri()));
    execute(request).await.unwrap();

    let received = server.received_requests().await.unwrap();
    let length = received[0].headers.get("content-length").unwrap();
    assert_eq!(length.to_str().unwrap(), "0");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_error_status_passed_through() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(403).set_body_string(r#"{"errors":["permission denied"]}"#))
        .mount(&server)
        .await;

    let request = HttpRequest::new(HttpMethod::Delete, format!("{}/v1/secret/data/app", server.uri()));
    let response = execute(request).await.unwrap();

    assert_eq!(response.status(), 403);
    assert!(!response.is_success());
    assert!(response.text().contains("permission denied"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let request = HttpRequest::new(HttpMethod::Get, format!("{}/v1/sys/health", server.uri()))
        .read_timeout(Duration::from_millis(200));
    let err = execute(request).await.unwrap_err();

    assert!(matches!(err, VaultError::Timeout(_)), "got {err:?}");
    assert!(err.is_retryable());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_refused_connection_is_connect_error() {
    // bind then release a port so nothing is listening on it
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let request = HttpRequest::new(HttpMethod::Get, format!("http://127.0.0.1:{port}/v1/sys/health"))
        .open_timeout(Duration::from_secs(2));
    let err = execute(request).await.unwrap_err();

    assert!(matches!(err, VaultError::Connect(_)), "got {err:?}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_empty_header_values_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let request = HttpRequest::new(HttpMethod::Get, format!("{}/v1/sys/health", server.uri()))
        .header("X-Vault-Namespace", "old")
        .header("X-Vault-Namespace", "new")
        .header("X-Vault-Token", "");
    execute(request).await.unwrap();

    let received = server.received_requests().await.unwrap();
    let namespaces: Vec<_> = received[0].headers.get_all("x-vault-namespace").iter().collect();
    assert_eq!(namespaces.len(), 1);
    assert_eq!(namespaces[0].to_str().unwrap(), "new");
    assert!(received[0].headers.get("x-vault-token").is_none());
}
