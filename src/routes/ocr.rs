//! OCR endpoint
//!
//! `POST /ocr` takes a multipart upload in field `image` and answers the
//! extracted word to meaning mapping. Errors are plain text.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use tracing::{debug, error, info};

use crate::{
    error::{AppError, AppResult, PlainTextError},
    ocr::{OcrExtraction, UploadedImage},
    routes::metrics::record_request,
    AppState,
};

/// Multipart field holding the image
pub const IMAGE_FIELD: &str = "image";

/// MIME type assumed when the upload declares none
const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(err.body_text())
    }
}

/// Pull the `image` field out of the upload
///
/// A request that is not multipart, or carries no non-empty `image` field,
/// counts as a missing upload.
async fn read_image(
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<UploadedImage> {
    let mut multipart = multipart.map_err(|e| {
        debug!(error = %e, "Request is not a multipart upload");
        AppError::UploadMissing
    })?;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let mime_type = field
            .content_type()
            .unwrap_or(FALLBACK_MIME_TYPE)
            .to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;

        if bytes.is_empty() {
            return Err(AppError::UploadMissing);
        }
        return Ok(UploadedImage { bytes, mime_type });
    }

    Err(AppError::UploadMissing)
}

/// Handle OCR requests
pub async fn ocr(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<OcrExtraction>, PlainTextError> {
    let start_time = Instant::now();

    let result = match read_image(multipart).await {
        Ok(image) => state.ocr.extract(&image).await,
        Err(e) => Err(e),
    };
    let duration = start_time.elapsed().as_secs_f64();

    match result {
        Ok(extraction) => {
            record_request("ocr", "success", duration);
            info!(
                words = extraction.len(),
                duration_ms = %format!("{:.2}", duration * 1000.0),
                "OCR request completed"
            );
            Ok(Json(extraction))
        }
        Err(e) => {
            record_request("ocr", "error", duration);
            error!(error = %e, "OCR request failed");
            Err(PlainTextError(e))
        }
    }
}
