//! Gemini HTTP client
//!
//! Forwards `generateContent` calls to Google's generative language API.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use tracing::{debug, error, instrument};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    gemini::{
        headers::build_default_headers,
        provider::GenerativeModel,
        types::{GenerateContentRequest, GenerateContentResponse},
    },
};

/// Gemini API client
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
}

impl GeminiClient {
    /// Create a new Gemini client
    ///
    /// Fails if the configured API key cannot be sent as a header value.
    pub fn new(client: reqwest::Client, config: &Config) -> anyhow::Result<Self> {
        let headers = build_default_headers(&config.gemini_api_key)?;
        Ok(Self {
            client,
            base_url: config.gemini_api_url.trim_end_matches('/').to_string(),
            headers,
        })
    }

    fn generate_url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    #[instrument(skip(self, request), fields(model = %model, contents = request.contents.len()))]
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> AppResult<GenerateContentResponse> {
        let url = self.generate_url(model);
        debug!(url = %url, "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .headers(self.headers.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to reach Gemini");
                e
            })?;

        let status = response.status();
        debug!(status = %status, "Gemini response status");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(status = %status, body = %text, "Gemini request failed");
            return Err(AppError::ExternalCallFailure(format!(
                "Gemini error {}: {}",
                status, text
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, body = %body, "Failed to parse Gemini response");
            AppError::ExternalCallFailure(format!("Failed to parse Gemini response: {}", e))
        })
    }
}
