//! Error types for Parrot
//!
//! This module defines custom error types used throughout the application.
//! `AppError` renders as a JSON error body; [`PlainTextError`] renders the
//! same error as a bare text body for endpoints whose clients expect text.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::ocr::NormalizationError;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("No files were uploaded.")]
    UploadMissing,

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("External call failed: {0}")]
    ExternalCallFailure(String),

    #[error("Model output is not well formed: {0}")]
    NotWellFormed(#[from] NormalizationError),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Error details
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl AppError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) | AppError::UploadMissing => {
                StatusCode::BAD_REQUEST
            }
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::ExternalCallFailure(_) | AppError::NotWellFormed(_) | AppError::HttpError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::UploadMissing => "UPLOAD_MISSING",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::ExternalCallFailure(_) | AppError::HttpError(_) => "EXTERNAL_CALL_FAILURE",
            AppError::NotWellFormed(_) => "NOT_WELL_FORMED",
        }
    }

    /// Message safe to show to callers
    ///
    /// Upstream bodies and parse causes stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::BadRequest(msg) => msg.clone(),
            AppError::UploadMissing => self.to_string(),
            AppError::PayloadTooLarge(msg) => msg.clone(),
            AppError::ExternalCallFailure(_) | AppError::HttpError(_) => {
                "Error calling the model provider".to_string()
            }
            AppError::NotWellFormed(_) => "Model output is not valid JSON".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.public_message(),
            },
        };

        (self.status_code(), Json(body)).into_response()
    }
}

/// Plain-text rendering of an [`AppError`]
///
/// Used by the OCR endpoint, whose clients read the body as text.
#[derive(Debug)]
pub struct PlainTextError(pub AppError);

impl PlainTextError {
    fn message(&self) -> String {
        match &self.0 {
            AppError::NotWellFormed(_) => "OCR output is not valid JSON".to_string(),
            AppError::ExternalCallFailure(_) | AppError::HttpError(_) => {
                "Error processing image.".to_string()
            }
            other => other.public_message(),
        }
    }
}

impl From<AppError> for PlainTextError {
    fn from(err: AppError) -> Self {
        PlainTextError(err)
    }
}

impl IntoResponse for PlainTextError {
    fn into_response(self) -> Response {
        (self.0.status_code(), self.message()).into_response()
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
