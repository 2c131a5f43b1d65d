//! Generative model abstraction
//!
//! Defines the trait the relay and OCR components call, so the HTTP client
//! can be swapped for another backend or a test double.

use async_trait::async_trait;

use crate::error::AppResult;
use crate::gemini::types::{GenerateContentRequest, GenerateContentResponse};

/// Trait defining the interface to a generative model provider
///
/// Implementations are shared read-only across concurrent requests, so they
/// must not hold per-request state.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Get the provider name for logging and metrics
    fn name(&self) -> &'static str;

    /// Run one `generateContent` call against `model`
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> AppResult<GenerateContentResponse>;
}
