//! Configuration management for Parrot
//!
//! Configuration is loaded from environment variables.

use anyhow::{Context, Result};
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Gemini API base URL
    pub gemini_api_url: String,
    /// Gemini API key (GOOGLE_GEN_AI_KEY)
    pub gemini_api_key: String,
    /// Model used by the chat endpoint
    pub chat_model: String,
    /// Model used by the OCR endpoint
    pub vision_model: String,

    /// Timeout for outbound model calls (in seconds)
    pub request_timeout_seconds: u64,
    /// Maximum accepted request body size (in bytes)
    pub max_upload_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("PARROT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PARROT_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("Invalid PARROT_PORT")?,

            gemini_api_url: env::var("GEMINI_API_URL").unwrap_or_else(|_| {
                "https://generativelanguage.googleapis.com/v1beta".to_string()
            }),
            gemini_api_key: env::var("GOOGLE_GEN_AI_KEY")
                .context("GOOGLE_GEN_AI_KEY must be set")?,
            chat_model: env::var("GEMINI_CHAT_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash-latest".to_string()),
            vision_model: env::var("GEMINI_VISION_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash-latest".to_string()),

            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .context("Invalid REQUEST_TIMEOUT_SECONDS")?,
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| (10 * 1024 * 1024).to_string())
                .parse()
                .context("Invalid MAX_UPLOAD_BYTES")?,
        })
    }
}
