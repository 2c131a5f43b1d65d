//! Chat endpoint integration tests
//!
//! Tests for `POST /gemini`:
//! - Relaying history and the new message to the chat model
//! - Fixed persona, generation parameters and safety settings
//! - Validation and provider failure responses

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{constants, TestHarness};

#[tokio::test]
async fn test_chat_with_empty_history() {
    let harness = TestHarness::new().await;
    harness
        .gemini
        .mock_generate_text(
            constants::CHAT_MODEL,
            "Welcome to our fast food store. What can I get for you today?",
        )
        .await;

    let response = harness
        .server
        .post("/gemini")
        .json(&json!({"history": [], "message": "hi"}))
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(
        json,
        json!({"text": "Welcome to our fast food store. What can I get for you today?"})
    );

    let bodies = harness.gemini.received_bodies().await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(
        bodies[0]["contents"],
        json!([{"role": "user", "parts": [{"text": "hi"}]}])
    );
}

#[tokio::test]
async fn test_chat_forwards_history_and_fixed_settings() {
    let harness = TestHarness::new().await;
    harness
        .gemini
        .mock_generate_text(constants::CHAT_MODEL, "Set menu or single item?")
        .await;

    let history = json!([
        {"role": "user", "parts": [{"text": "hi"}]},
        {"role": "model", "parts": [{"text": "Welcome! What can I get for you today?"}]}
    ]);

    let response = harness
        .server
        .post("/gemini")
        .json(&json!({"history": history, "message": "One cheeseburger"}))
        .await;
    response.assert_status_ok();

    let requests = harness.gemini.received_requests().await;
    assert_eq!(
        requests[0].headers.get("x-goog-api-key").unwrap(),
        constants::TEST_API_KEY
    );

    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let contents = body["contents"].as_array().unwrap();
    assert_eq!(contents.len(), 3);
    assert_eq!(&contents[..2], &history.as_array().unwrap()[..]);
    assert_eq!(
        contents[2],
        json!({"role": "user", "parts": [{"text": "One cheeseburger"}]})
    );

    assert!(body["systemInstruction"]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .contains("fast-food clerk"));
    assert_eq!(
        body["generationConfig"],
        json!({
            "temperature": 1.0,
            "topP": 0.95,
            "topK": 64,
            "maxOutputTokens": 8192,
            "responseMimeType": "text/plain"
        })
    );

    let safety = body["safetySettings"].as_array().unwrap();
    assert_eq!(safety.len(), 4);
    assert!(safety
        .iter()
        .all(|s| s["threshold"] == "BLOCK_MEDIUM_AND_ABOVE"));
}

#[tokio::test]
async fn test_chat_rejects_empty_message_without_calling_provider() {
    let harness = TestHarness::new().await;
    harness
        .gemini
        .mock_generate_text(constants::CHAT_MODEL, "unused")
        .await;

    let response = harness
        .server
        .post("/gemini")
        .json(&json!({"history": [], "message": "  "}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");

    assert!(harness.gemini.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_chat_rejects_malformed_body() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .post("/gemini")
        .json(&json!({"history": [{"role": "assistant", "parts": []}], "message": "hi"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_chat_body_over_limit_is_413() {
    let harness = TestHarness::with_upload_limit(256).await;
    harness
        .gemini
        .mock_generate_text(constants::CHAT_MODEL, "unused")
        .await;

    let response = harness
        .server
        .post("/gemini")
        .json(&json!({"history": [], "message": "a".repeat(4096)}))
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    let json: Value = response.json();
    assert_eq!(json["error"]["code"], "PAYLOAD_TOO_LARGE");

    assert!(harness.gemini.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_chat_provider_error_is_500_with_typed_body() {
    let harness = TestHarness::new().await;
    harness
        .gemini
        .mock_generate_error(constants::CHAT_MODEL, 429, "Quota exceeded")
        .await;

    let response = harness
        .server
        .post("/gemini")
        .json(&json!({"history": [], "message": "hi"}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert_eq!(json["error"]["code"], "EXTERNAL_CALL_FAILURE");

    // No retry on failure
    assert_eq!(harness.gemini.received_requests().await.len(), 1);
}

#[tokio::test]
async fn test_chat_blocked_prompt_is_external_failure() {
    let harness = TestHarness::new().await;
    harness.gemini.mock_blocked_prompt(constants::CHAT_MODEL).await;

    let response = harness
        .server
        .post("/gemini")
        .json(&json!({"history": [], "message": "something rude"}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert_eq!(json["error"]["code"], "EXTERNAL_CALL_FAILURE");
}
