//! Parrot - chat and vocabulary OCR relay for the Gemini API
//!
//! This library provides the core functionality for the Parrot server.
//! It relays role-play chat turns to a conversational model and turns
//! uploaded vocabulary images into word to meaning mappings.

pub mod chat;
pub mod config;
pub mod error;
pub mod gemini;
pub mod ocr;
pub mod routes;

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;

pub use crate::chat::ChatRelay;
pub use crate::config::Config;
pub use crate::gemini::{GeminiClient, GenerativeModel};
pub use crate::ocr::OcrExtractor;

/// Application state shared across all request handlers
///
/// Built once at startup and never mutated afterwards.
pub struct AppState {
    pub config: Config,
    pub start_time: Instant,
    /// Model provider shared by both endpoints
    pub model: Arc<dyn GenerativeModel>,
    pub chat: ChatRelay,
    pub ocr: OcrExtractor,
}

impl AppState {
    /// Create a new application state backed by the Gemini API
    pub fn new(config: Config) -> Result<Self> {
        // Initialize HTTP client with connection pooling
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(100)
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        let model: Arc<dyn GenerativeModel> = Arc::new(GeminiClient::new(http_client, &config)?);

        Ok(Self::with_model(config, model))
    }

    /// Create application state around an existing model provider
    pub fn with_model(config: Config, model: Arc<dyn GenerativeModel>) -> Self {
        let chat = ChatRelay::new(model.clone(), config.chat_model.clone());
        let ocr = OcrExtractor::new(model.clone(), config.vision_model.clone());

        Self {
            config,
            start_time: Instant::now(),
            model,
            chat,
            ocr,
        }
    }
}
