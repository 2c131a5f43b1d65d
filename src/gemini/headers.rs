//! Header utilities for Gemini requests
//!
//! Builds the minimal header set sent upstream. Client headers are never
//! forwarded, so the provider key is the only credential that leaves the
//! process.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue, CONTENT_TYPE};

/// Header carrying the Gemini API key
pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-goog-api-key");

/// Build default headers for Gemini requests
pub fn build_default_headers(api_key: &str) -> Result<HeaderMap, InvalidHeaderValue> {
    let mut headers = HeaderMap::new();

    let mut key = HeaderValue::from_str(api_key)?;
    key.set_sensitive(true);
    headers.insert(API_KEY_HEADER, key);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok(headers)
}
