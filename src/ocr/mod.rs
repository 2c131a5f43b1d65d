//! OCR module
//!
//! Turns an uploaded vocabulary image into a word to meaning mapping.

pub mod extract;
pub mod normalize;

pub use extract::{OcrExtractor, UploadedImage};
pub use normalize::{normalize, strip_fences, NormalizationError, OcrExtraction};
