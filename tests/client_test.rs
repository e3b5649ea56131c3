// tests/client_test.rs

use eduflex_cli::client::RobustClient;
use eduflex_cli::config::AppConfig;
use eduflex_cli::error::AppError;
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::Arc;

fn client_for(server_url: &str, max_retries: u32, tenant: Option<&str>) -> RobustClient {
    let config = AppConfig {
        base_url: server_url.to_string(),
        tenant: tenant.map(String::from),
        max_retries,
        ..AppConfig::default()
    };
    RobustClient::new(Arc::new(config))
        .expect("Failed to create client")
        .with_token(Some("abc123".to_string()))
}

#[tokio::test]
async fn test_requests_carry_bearer_token_and_tenant_header() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/courses/5/materials")
        .match_header("authorization", "Bearer abc123")
        .match_header("x-tenant-id", "skola-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let client = client_for(&server.url(), 0, Some("skola-1"));
    let url = format!("{}/api/courses/5/materials", server.url());
    let body: Vec<Value> = client.get_json(&url).await.expect("request should succeed");

    assert!(body.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_401_maps_to_token_invalid() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/quizzes/course/5")
        .with_status(401)
        .create_async()
        .await;

    let client = client_for(&server.url(), 0, None);
    let url = format!("{}/api/quizzes/course/5", server.url());
    let err = client.get_json::<Value>(&url).await.unwrap_err();

    assert!(matches!(err, AppError::TokenInvalid));
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_402_maps_to_license_required() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/quizzes/course/5")
        .with_status(402)
        .create_async()
        .await;

    let client = client_for(&server.url(), 0, None);
    let url = format!("{}/api/quizzes/course/5", server.url());
    let err = client.get_json::<Value>(&url).await.unwrap_err();

    assert!(matches!(err, AppError::LicenseRequired));
}

#[tokio::test]
async fn test_error_body_message_is_surfaced() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/courses/99/materials")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Kursen finns inte"}"#)
        .create_async()
        .await;

    let client = client_for(&server.url(), 0, None);
    let url = format!("{}/api/courses/99/materials", server.url());
    let err = client.get_json::<Value>(&url).await.unwrap_err();

    match err {
        AppError::Http { status, message } => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(message, "Kursen finns inte");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_no_retry_by_default() {
    let mut server = mockito::Server::new_async().await;
    let mock_503 = server
        .mock("GET", "/flaky")
        .with_status(503)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server.url(), 0, None);
    let err = client
        .get(&format!("{}/flaky", server.url()))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
    mock_503.assert_async().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_configured_retries_recover_from_transient_errors() {
    let mut server = mockito::Server::new_async().await;

    // 第一次请求返回 503，重试后返回 200
    let mock_503 = server
        .mock("GET", "/flaky")
        .with_status(503)
        .expect(1)
        .create_async()
        .await;
    let mock_200 = server
        .mock("GET", "/flaky")
        .with_status(200)
        .with_body("ok")
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server.url(), 2, None);
    let response = client
        .get(&format!("{}/flaky", server.url()))
        .await
        .expect("Request should eventually succeed");

    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "ok");
    mock_503.assert_async().await;
    mock_200.assert_async().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_post_is_never_retried() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/quizzes/9/submit")
        .with_status(503)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server.url(), 2, None);
    let url = format!("{}/api/quizzes/9/submit", server.url());
    let err = client
        .send_json::<_, Value>(reqwest::Method::POST, &url, &serde_json::json!({"score": 1}))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_multipart_requests_carry_same_headers() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/api/courses/materials/4")
        .match_header("authorization", "Bearer abc123")
        .match_header("x-tenant-id", "skola-1")
        .match_header("content-type", mockito::Matcher::Regex("^multipart/form-data".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": 4}"#)
        .create_async()
        .await;

    let client = client_for(&server.url(), 0, Some("skola-1"));
    let url = format!("{}/api/courses/materials/4", server.url());
    let form = reqwest::multipart::Form::new().text("title", "Lektion");
    let saved: Option<Value> = client
        .send_multipart(reqwest::Method::PUT, &url, form)
        .await
        .expect("multipart request should succeed");

    assert_eq!(saved.unwrap()["id"], 4);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_tenant_with_invalid_characters_is_rejected() {
    let server = mockito::Server::new_async().await;
    let client = client_for(&server.url(), 0, Some("skola\n1"));
    let err = client
        .get(&format!("{}/api/quizzes/course/5", server.url()))
        .await
        .unwrap_err();
    assert!(err.is_validation());
}
