//! Gemini module
//!
//! Wire types, the provider trait and the HTTP client for Google's
//! generative language API.

pub mod client;
pub mod headers;
pub mod provider;
pub mod types;

pub use client::GeminiClient;
pub use provider::GenerativeModel;
