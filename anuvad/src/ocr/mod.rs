//! Optical character recognition
//!
//! Text extraction from images is delegated to an external engine behind the
//! [`OcrEngine`] trait. The shipped implementation drives the `tesseract`
//! command-line binary; availability is probed at startup rather than
//! assumed, so a host without Tesseract still serves text translation.

pub mod tesseract;

use async_trait::async_trait;

use crate::error::TranslateResult;

pub use tesseract::TesseractEngine;

/// Static guidance shown when no OCR engine is installed
pub const OCR_INSTALL_HINT: &str = "Tesseract is not installed. Install it with your package \
manager (e.g. 'apt install tesseract-ocr tesseract-ocr-hin' or 'brew install tesseract') and \
restart the service.";

/// Text extracted from an image
#[derive(Debug, Clone, PartialEq)]
pub struct OcrOutput {
    pub text: String,
    /// Mean word confidence in [0, 1], absent when the engine reports none
    pub confidence: Option<f32>,
}

/// Trait all OCR engines implement
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Engine identifier (e.g. "tesseract")
    fn name(&self) -> &'static str;

    /// Extract text from an encoded image
    async fn recognize(&self, image: &[u8]) -> TranslateResult<OcrOutput>;
}

/// Map a supported language code to its Tesseract traineddata name
pub fn tesseract_lang(code: &str) -> Option<&'static str> {
    match code {
        "en" => Some("eng"),
        "hi" => Some("hin"),
        "bn" => Some("ben"),
        "ta" => Some("tam"),
        "te" => Some("tel"),
        "mr" => Some("mar"),
        "kn" => Some("kan"),
        "ml" => Some("mal"),
        "gu" => Some("guj"),
        _ => None,
    }
}
