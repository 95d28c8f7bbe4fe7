//! Tests for the enhance API client
//!
//! Uses wiremock to mock HTTP responses from the service.

use prompt_enhancer::client::EnhanceClient;
use prompt_enhancer::config::{Config, ConfigOptions};
use prompt_enhancer::contract::{EnhanceRequest, EnhanceResponse};
use prompt_enhancer::enhancer::{OptimizationLevel, UserRole};
use prompt_enhancer::error::EnhanceError;
use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> EnhanceClient {
    let config = Config::new(base_url.to_string(), ConfigOptions::default()).unwrap();
    EnhanceClient::new(config).unwrap()
}

fn sample_response() -> EnhanceResponse {
    EnhanceResponse {
        enhanced_prompt: "Enhanced: hello".to_string(),
        thinking_process: "1. Restated the task.".to_string(),
        original_tokens: 2,
        enhanced_tokens: 40,
        token_savings: -38,
        cost_savings_usd: -0.000114,
        processing_time: 0.0004,
        formatted_response: "Enhanced: hello".to_string(),
    }
}

// ============================================================
// Construction
// ============================================================

#[test]
fn test_client_requires_base_url() {
    let config = Config::for_service(ConfigOptions::default()).unwrap();
    let result = EnhanceClient::new(config);

    assert!(matches!(result, Err(EnhanceError::Validation(_))));
}

#[test]
fn test_client_exposes_base_url() {
    let client = test_client("http://127.0.0.1:8787");
    assert_eq!(client.base_url(), "http://127.0.0.1:8787");
}

// ============================================================
// Enhance round trip
// ============================================================

#[tokio::test]
async fn test_enhance_posts_and_parses_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/enhance"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let result = client.enhance(&EnhanceRequest::new("hello")).await.unwrap();

    assert_eq!(result.enhanced_prompt, "Enhanced: hello");
    assert_eq!(result.original_tokens, 2);
    assert_eq!(result.enhanced_tokens, 40);
    assert_eq!(result.token_savings, -38);
    assert_eq!(result.formatted_response, "Enhanced: hello");
}

#[tokio::test]
async fn test_enhance_surfaces_stub_token_counts_unchanged() {
    let mock_server = MockServer::start().await;

    // Stub a service that doubles the token estimate of a 40-char prompt
    Mock::given(method("POST"))
        .and(path("/api/enhance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "enhanced_prompt": "Enhanced: xxxx",
            "thinking_process": "1. doubled",
            "original_tokens": 10,
            "enhanced_tokens": 20,
            "token_savings": -10,
            "cost_savings_usd": -0.00003,
            "processing_time": 0.001,
            "formatted_response": "Enhanced: xxxx"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let prompt = "x".repeat(40);
    let result = client.enhance(&EnhanceRequest::new(prompt)).await.unwrap();

    assert_eq!(result.original_tokens, 10);
    assert_eq!(result.enhanced_tokens, 20);
    assert_eq!(result.token_savings, -10);
}

#[tokio::test]
async fn test_enhance_serializes_role_and_level_on_the_wire() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/enhance"))
        .and(body_json(json!({
            "original_prompt": "hello",
            "user_role": "developer",
            "optimization_level": "aggressive"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = EnhanceRequest::new("hello")
        .with_role(UserRole::Developer)
        .with_level(OptimizationLevel::Aggressive);
    let client = test_client(&mock_server.uri());

    assert!(client.enhance(&request).await.is_ok());
}

#[tokio::test]
async fn test_enhance_sends_request_id_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/enhance"))
        .and(header_exists("x-request-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    assert!(client.enhance(&EnhanceRequest::new("hello")).await.is_ok());
}

#[tokio::test]
async fn test_enhance_skips_network_on_invalid_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/enhance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_response()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let result = client.enhance(&EnhanceRequest::new("   ")).await;

    let error = result.unwrap_err();
    assert!(error.is_validation());
}

// ============================================================
// Error mapping
// ============================================================

#[tokio::test]
async fn test_enhance_maps_error_envelope_to_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/enhance"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "error": "original_prompt must not be empty"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let error = client
        .enhance(&EnhanceRequest::new("hello"))
        .await
        .unwrap_err();

    match error {
        EnhanceError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "original_prompt must not be empty");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_enhance_maps_server_error_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/enhance"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "success": false,
            "error": "Internal server error"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let error = client
        .enhance(&EnhanceRequest::new("hello"))
        .await
        .unwrap_err();

    match error {
        EnhanceError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal server error");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_enhance_uses_raw_body_when_envelope_missing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/enhance"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let error = client
        .enhance(&EnhanceRequest::new("hello"))
        .await
        .unwrap_err();

    match error {
        EnhanceError::Api { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "bad gateway");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_enhance_reports_empty_error_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/enhance"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let error = client
        .enhance(&EnhanceRequest::new("hello"))
        .await
        .unwrap_err();

    match error {
        EnhanceError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "empty error body");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_enhance_rejects_unparseable_success_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/enhance"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let error = client
        .enhance(&EnhanceRequest::new("hello"))
        .await
        .unwrap_err();

    assert!(matches!(error, EnhanceError::UnexpectedResponse(_)));
}

#[tokio::test]
async fn test_enhance_surfaces_transport_errors() {
    // Nothing listens on port 1
    let client = test_client("http://127.0.0.1:1");
    let error = client
        .enhance(&EnhanceRequest::new("hello"))
        .await
        .unwrap_err();

    assert!(matches!(error, EnhanceError::Transport(_)));
}

// ============================================================
// Health
// ============================================================

#[tokio::test]
async fn test_health_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "service": "Prompt Enhancer API"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let health = client.health().await.unwrap();

    assert_eq!(health.status, "ok");
    assert_eq!(health.service, "Prompt Enhancer API");
}

#[tokio::test]
async fn test_health_maps_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let error = client.health().await.unwrap_err();

    match error {
        EnhanceError::Api { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "unavailable");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_health_rejects_invalid_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2, 3])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let error = client.health().await.unwrap_err();

    assert!(matches!(error, EnhanceError::UnexpectedResponse(_)));
}
