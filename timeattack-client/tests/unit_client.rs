use std::time::Duration;

use timeattack_client::{ClientConfig, RestClient, DEFAULT_PORT, DEFAULT_TIMEOUT};
use timeattack_common::{RequestExecutor, RequestMethod, TimeAttackError};

// Helper: build a ClientConfig aimed at the given mockito server URL.
fn target_config(server_url: &str) -> ClientConfig {
    let addr = server_url.trim_start_matches("http://");
    let (host, port) = addr.split_once(':').expect("mockito URL has no port");
    ClientConfig {
        host: host.to_string(),
        port: port.parse().expect("mockito URL port not numeric"),
        timeout: Duration::from_secs(5),
    }
}

// Helper: a client pointed at localhost:8080 for tests that never actually connect.
fn localhost_client() -> RestClient {
    let mut config = ClientConfig::new("127.0.0.1");
    config.port = 8080;
    RestClient::new(config).expect("client build failed")
}

#[test]
fn test_client_config_defaults() {
    let config = ClientConfig::new("localhost");
    assert_eq!(config.host, "localhost");
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.timeout, DEFAULT_TIMEOUT);
}

#[test]
fn test_build_url() {
    let client = localhost_client();
    assert_eq!(client.build_url("/login"), "http://127.0.0.1:8080/login");
}

#[test]
fn test_build_url_root_path() {
    let client = localhost_client();
    assert_eq!(client.build_url("/"), "http://127.0.0.1:8080/");
}

#[test]
fn test_build_url_with_custom_port() {
    let mut config = ClientConfig::new("localhost");
    config.port = 9000;
    let client = RestClient::new(config).expect("client build failed");
    assert_eq!(client.build_url("/check"), "http://localhost:9000/check");
}

// --- POST ---

#[tokio::test]
async fn test_post_sends_form_encoded_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/login")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body("password=000111222333")
        .with_status(200)
        .with_body("denied")
        .create_async()
        .await;

    let client = RestClient::new(target_config(&server.url())).expect("client build failed");
    let response = client
        .execute(RequestMethod::Post, "/login", "password=000111222333")
        .await
        .expect("request failed");

    mock.assert_async().await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body, "denied");
}

#[tokio::test]
async fn test_post_returns_response_on_unauthorized() {
    // 401 is a completed exchange, not a failure: the latency is the signal.
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/login")
        .with_status(401)
        .with_body("bad password")
        .create_async()
        .await;

    let client = RestClient::new(target_config(&server.url())).expect("client build failed");
    let response = client
        .execute(RequestMethod::Post, "/login", "password=x")
        .await
        .expect("request failed");

    assert_eq!(response.status, 401);
    assert_eq!(response.body, "bad password");
}

#[tokio::test]
async fn test_post_returns_response_on_500() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/login")
        .with_status(500)
        .create_async()
        .await;

    let client = RestClient::new(target_config(&server.url())).expect("client build failed");
    let response = client
        .execute(RequestMethod::Post, "/login", "password=x")
        .await
        .expect("request failed");

    assert_eq!(response.status, 500);
}

// --- GET ---

#[tokio::test]
async fn test_get_ignores_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/check")
        .with_status(200)
        .with_body("ok")
        .create_async()
        .await;

    let client = RestClient::new(target_config(&server.url())).expect("client build failed");
    let response = client
        .execute(RequestMethod::Get, "/check", "ignored")
        .await
        .expect("request failed");

    mock.assert_async().await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body, "ok");
}

// --- Transport failures ---

#[tokio::test]
async fn test_execute_fails_when_server_unreachable() {
    // Port 59219 is not bound to anything — connection will be refused immediately
    let mut config = ClientConfig::new("127.0.0.1");
    config.port = 59219;
    config.timeout = Duration::from_secs(1);
    let client = RestClient::new(config).expect("client build failed");

    let result = client.execute(RequestMethod::Post, "/", "password=x").await;

    assert!(matches!(result, Err(TimeAttackError::RequestFailed(_))));
}

#[tokio::test]
async fn test_redirects_are_not_followed() {
    // The 302 itself must come back; following it would skew the timing.
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/login")
        .with_status(302)
        .with_header("Location", "/elsewhere")
        .create_async()
        .await;

    let client = RestClient::new(target_config(&server.url())).expect("client build failed");
    let response = client
        .execute(RequestMethod::Post, "/login", "password=x")
        .await
        .expect("request failed");

    assert_eq!(response.status, 302);
}
