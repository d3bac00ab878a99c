//! Wire-contract types for the `/api/translation` endpoints
//!
//! These shapes are shared by the HTTP service and the client gateway so the
//! two sides cannot drift apart. Field names are part of the public contract;
//! do not rename them without versioning the API.

use serde::{Deserialize, Serialize};

use crate::provider::ProviderId;

/// Maximum accepted text length, enforced before dispatching to a provider
pub const MAX_TEXT_LEN: usize = 5000;

/// Upper bound on uploaded image size. A UX guard, not a security boundary.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Body of `POST /api/translation/simple` and `/translate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub target_lang: String,
    #[serde(default)]
    pub source_lang: Option<String>,
    #[serde(default)]
    pub provider: Option<ProviderId>,
}

/// Successful text translation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub original_text: String,
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub provider: String,
    pub confidence: Option<f32>,
    #[serde(default)]
    pub is_mock: bool,
}

/// Successful image translation (OCR + translate)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageTranslateResponse {
    pub extracted_text: String,
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub provider: String,
    pub ocr_confidence: Option<f32>,
    #[serde(default)]
    pub is_mock: bool,
}

/// Response of `POST /api/translation/detect-language`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionResponse {
    pub detected_lang: String,
    pub language_name: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub code: String,
    pub name: String,
}

/// Response of `GET /api/translation/languages`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguagesResponse {
    pub languages: Vec<LanguageInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderFlags {
    pub deep_translator: bool,
    pub google: bool,
    pub mock: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextTranslationStatus {
    pub available: bool,
    pub providers: ProviderFlags,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageTranslationStatus {
    pub available: bool,
    pub engine: Option<String>,
    pub installation_guide: Option<String>,
}

/// Response of `GET /api/translation/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub text_translation: TextTranslationStatus,
    pub image_translation: ImageTranslationStatus,
    pub supported_languages: usize,
    pub status: String,
}

/// Error body for every non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}
