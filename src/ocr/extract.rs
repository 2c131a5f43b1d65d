//! Vocabulary extraction from uploaded images

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine};
use bytes::Bytes;
use tracing::{debug, info, instrument};

use crate::{
    error::AppResult,
    gemini::{
        types::{Content, GenerateContentRequest, Part},
        GenerativeModel,
    },
    ocr::normalize::{normalize, OcrExtraction},
    routes::metrics::record_usage,
};

/// Instruction sent alongside every image
pub const EXTRACTION_PROMPT: &str = "Use OCR to extract English words and their corresponding Korean meanings from the image as text. Return a JSON object where the keys are the English words and the values are the corresponding Korean meanings.";

/// An uploaded image and its declared MIME type
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub bytes: Bytes,
    pub mime_type: String,
}

/// Sends images to the vision model and normalizes its answer
pub struct OcrExtractor {
    model: Arc<dyn GenerativeModel>,
    model_name: String,
}

impl OcrExtractor {
    pub fn new(model: Arc<dyn GenerativeModel>, model_name: impl Into<String>) -> Self {
        Self {
            model,
            model_name: model_name.into(),
        }
    }

    /// Build the single-turn request carrying the prompt and the image
    pub fn build_request(image: &UploadedImage) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: None,
            contents: vec![Content::user(vec![
                Part::text(EXTRACTION_PROMPT),
                Part::inline_data(image.mime_type.clone(), STANDARD.encode(&image.bytes)),
            ])],
            generation_config: None,
            safety_settings: Vec::new(),
        }
    }

    #[instrument(skip(self, image), fields(model = %self.model_name, mime_type = %image.mime_type, bytes = image.bytes.len()))]
    pub async fn extract(&self, image: &UploadedImage) -> AppResult<OcrExtraction> {
        let request = Self::build_request(image);
        let response = self
            .model
            .generate_content(&self.model_name, &request)
            .await?;

        if let Some(ref usage) = response.usage_metadata {
            record_usage(usage, &self.model_name);
        }

        let raw = response.text()?;
        debug!(raw = %raw, "Vision model output");

        let extraction = normalize(&raw)?;
        info!(words = extraction.len(), "Extracted vocabulary from image");
        Ok(extraction)
    }
}
