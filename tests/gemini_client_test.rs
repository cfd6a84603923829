//! GeminiClient against a local mock of the generateContent endpoint
//!
//! The client is blocking, so every call runs on `spawn_blocking`.

use rock_ai::analyzer::{ClientSettings, GeminiClient, VisionModel};
use rock_ai::error::{Result, RockAiError};
use rock_ai::loader::ImagePayload;
use rock_ai_common::{parse_analysis_response, AnalysisMode};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EMPTY_RESULT: &str = r#"{"summary": {"total_rocks": 0}, "rocks": []}"#;

fn settings(base_url: String) -> ClientSettings {
    ClientSettings {
        api_key: "test-key".into(),
        base_url,
        detailed_model: "gemini-2.5-pro".into(),
        quick_model: "gemini-2.5-flash".into(),
        detailed_thinking_budget: 32000,
        quick_thinking_budget: 8192,
        temperature: None,
        timeout_seconds: Some(10),
    }
}

fn payload() -> ImagePayload {
    ImagePayload {
        bytes: vec![0xff, 0xd8, 0xff],
        mime_type: "image/jpeg",
        width: 1,
        height: 1,
    }
}

async fn generate(base_url: String, mode: AnalysisMode) -> Result<String> {
    tokio::task::spawn_blocking(move || {
        let client = GeminiClient::new(settings(base_url))?;
        client.generate(&payload(), "identify the rocks", mode)
    })
    .await
    .expect("blocking task panicked")
}

#[tokio::test(flavor = "multi_thread")]
async fn test_successful_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-pro:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": {
                "responseMimeType": "application/json",
                "thinkingConfig": {"thinkingBudget": 32000}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": EMPTY_RESULT}]},
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = generate(format!("{}/v1beta", server.uri()), AnalysisMode::Detailed)
        .await
        .unwrap();
    assert_eq!(text, EMPTY_RESULT);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_quick_mode_uses_quick_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(body_partial_json(json!({
            "generationConfig": {"thinkingConfig": {"thinkingBudget": 8192}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": EMPTY_RESULT}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = generate(format!("{}/v1beta", server.uri()), AnalysisMode::Quick)
        .await
        .unwrap();
    assert_eq!(text, EMPTY_RESULT);

    let result = parse_analysis_response(&text).unwrap();
    assert!(result.rocks.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unauthorized_is_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"code": 401, "message": "Request had invalid authentication credentials.", "status": "UNAUTHENTICATED"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = generate(format!("{}/v1beta", server.uri()), AnalysisMode::Detailed)
        .await
        .unwrap_err();
    assert!(matches!(err, RockAiError::Authentication(_)), "{:?}", err);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_key_bad_request_is_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT",
                "details": [{"reason": "API_KEY_INVALID"}]
            }
        })))
        .mount(&server)
        .await;

    let err = generate(format!("{}/v1beta", server.uri()), AnalysisMode::Detailed)
        .await
        .unwrap_err();
    assert!(matches!(err, RockAiError::Authentication(_)), "{:?}", err);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_is_transport_error_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .expect(1)
        .mount(&server)
        .await;

    let err = generate(format!("{}/v1beta", server.uri()), AnalysisMode::Detailed)
        .await
        .unwrap_err();
    match err {
        RockAiError::Transport(msg) => assert!(msg.contains("500"), "{}", msg),
        other => panic!("Expected Transport, got {:?}", other),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blocked_prompt_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        })))
        .mount(&server)
        .await;

    let err = generate(format!("{}/v1beta", server.uri()), AnalysisMode::Detailed)
        .await
        .unwrap_err();
    assert!(matches!(err, RockAiError::Transport(ref m) if m.contains("SAFETY")), "{:?}", err);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_connection_refused_is_transport_error() {
    let err = generate("http://127.0.0.1:1/v1beta".to_string(), AnalysisMode::Detailed)
        .await
        .unwrap_err();
    assert!(matches!(err, RockAiError::Transport(_)), "{:?}", err);
}
