//! Mock Gemini API for testing
//!
//! Provides wiremock-based mocks for `POST /models/{model}:generateContent`.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::mocks::gemini::MockGemini;
//!
//! #[tokio::test]
//! async fn test_with_gemini_mock() {
//!     let gemini = MockGemini::start().await;
//!     gemini.mock_generate_text("gemini-test", "Hello!").await;
//!
//!     // Use gemini.uri() as the Gemini API URL
//!     // ...
//! }
//! ```

use serde_json::{json, Value};
use wiremock::{
    matchers::{body_string_contains, header, header_exists, method, path},
    Mock, MockServer, Request, ResponseTemplate,
};

/// Path of the generateContent endpoint for `model`
pub fn generate_path(model: &str) -> String {
    format!("/models/{}:generateContent", model)
}

/// Successful response body carrying `text` as the only candidate part
pub fn text_response(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": {
            "promptTokenCount": 12,
            "candidatesTokenCount": 7,
            "totalTokenCount": 19
        }
    })
}

/// Mock Gemini server wrapper
pub struct MockGemini {
    server: MockServer,
}

impl MockGemini {
    /// Start a new mock Gemini server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Get the mock server URI
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Answer every call to `model` with `text`
    pub async fn mock_generate_text(&self, model: &str, text: &str) {
        Mock::given(method("POST"))
            .and(path(generate_path(model)))
            .and(header_exists("x-goog-api-key"))
            .and(header("Content-Type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_response(text)))
            .mount(&self.server)
            .await;
    }

    /// Answer with `text` only when the request body contains `needle`
    pub async fn mock_generate_text_when_body_contains(
        &self,
        model: &str,
        needle: &str,
        text: &str,
    ) {
        Mock::given(method("POST"))
            .and(path(generate_path(model)))
            .and(body_string_contains(needle))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_response(text)))
            .mount(&self.server)
            .await;
    }

    /// Answer every call to `model` with an API error
    pub async fn mock_generate_error(&self, model: &str, status: u16, message: &str) {
        Mock::given(method("POST"))
            .and(path(generate_path(model)))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "error": {"code": status, "message": message, "status": "RESOURCE_EXHAUSTED"}
            })))
            .mount(&self.server)
            .await;
    }

    /// Answer with a prompt blocked by the safety filter
    pub async fn mock_blocked_prompt(&self, model: &str) {
        Mock::given(method("POST"))
            .and(path(generate_path(model)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "promptFeedback": {"blockReason": "SAFETY"}
            })))
            .mount(&self.server)
            .await;
    }

    /// Answer with a 200 whose body is not JSON
    pub async fn mock_garbage_body(&self, model: &str) {
        Mock::given(method("POST"))
            .and(path(generate_path(model)))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&self.server)
            .await;
    }

    /// All requests received so far
    pub async fn received_requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Bodies of all received requests, parsed as JSON
    pub async fn received_bodies(&self) -> Vec<Value> {
        self.received_requests()
            .await
            .iter()
            .map(|r| serde_json::from_slice(&r.body).expect("request body is JSON"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_generate_text_responds() {
        let gemini = MockGemini::start().await;
        gemini.mock_generate_text("m", "hi there").await;

        let response = reqwest::Client::new()
            .post(format!("{}{}", gemini.uri(), generate_path("m")))
            .header("x-goog-api-key", "k")
            .json(&json!({"contents": []}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["candidates"][0]["content"]["parts"][0]["text"], "hi there");
        assert_eq!(gemini.received_requests().await.len(), 1);
    }

    #[tokio::test]
    async fn test_unmatched_request_gets_404() {
        let gemini = MockGemini::start().await;
        gemini.mock_generate_text("m", "hi").await;

        let response = reqwest::Client::new()
            .post(format!("{}{}", gemini.uri(), generate_path("other")))
            .json(&json!({}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 404);
    }
}
