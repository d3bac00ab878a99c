//! REST endpoints for translation, OCR, and service status
//!
//! All routes live under `/api/translation`. Success bodies are the shared
//! wire types from `anuvad::api`; every error is a non-2xx status with a
//! `{"detail": "..."}` body.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Form, Multipart, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use anuvad::api::{
    DetectionResponse, ErrorBody, ImageTranslateResponse, ImageTranslationStatus, LanguageInfo,
    LanguagesResponse, MAX_IMAGE_BYTES, MAX_TEXT_LEN, ProviderFlags, StatusResponse,
    TextTranslationStatus, TranslateRequest, TranslateResponse,
};
use anuvad::error::TranslateError;
use anuvad::languages;
use anuvad::ocr::{OCR_INSTALL_HINT, OcrEngine};
use anuvad::provider::{ProviderId, ProviderRegistry};

/// Shared service state: the provider set and the optional OCR engine
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ProviderRegistry>,
    pub ocr: Option<Arc<dyn OcrEngine>>,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn detail(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorBody { detail: message.into() }))
}

/// Map provider-layer failures onto wire statuses: unconfigured providers are
/// 503, everything else is a 500 with the error text as detail.
fn provider_error(err: TranslateError) -> ApiError {
    match err {
        TranslateError::ConfigError(_) => detail(StatusCode::SERVICE_UNAVAILABLE, err.to_string()),
        TranslateError::InvalidInput(_) => {
            detail(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
        }
        _ => detail(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

fn validate_lang(code: &str) -> Result<(), ApiError> {
    if languages::is_supported(code) {
        Ok(())
    } else {
        Err(detail(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("Unsupported language code '{}'", code),
        ))
    }
}

/// Build the service router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/translation/status", get(status))
        .route("/api/translation/translate", post(translate))
        .route("/api/translation/simple", post(translate))
        .route("/api/translation/translate-image", post(translate_image))
        .route("/api/translation/detect-language", post(detect_language))
        .route("/api/translation/languages", get(list_languages))
        .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + 64 * 1024))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `GET /api/translation/status`
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let ocr_available = state.ocr.is_some();
    Json(StatusResponse {
        text_translation: TextTranslationStatus {
            available: true,
            providers: ProviderFlags {
                deep_translator: true,
                google: state.registry.google_available(),
                mock: true,
            },
        },
        image_translation: ImageTranslationStatus {
            available: ocr_available,
            engine: state.ocr.as_ref().map(|e| e.name().to_string()),
            installation_guide: if ocr_available { None } else { Some(OCR_INSTALL_HINT.to_string()) },
        },
        supported_languages: languages::LANGUAGES.len(),
        status: "healthy".to_string(),
    })
}

/// `GET /api/translation/languages`
pub async fn list_languages() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: languages::LANGUAGES
            .iter()
            .map(|l| LanguageInfo { code: l.code.to_string(), name: l.name.to_string() })
            .collect(),
    })
}

/// `POST /api/translation/translate` and `/api/translation/simple`
pub async fn translate(
    State(state): State<AppState>,
    Json(payload): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    if payload.text.trim().is_empty() {
        return Err(detail(StatusCode::UNPROCESSABLE_ENTITY, "text must not be empty"));
    }
    if payload.text.len() > MAX_TEXT_LEN {
        return Err(detail(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("text exceeds the maximum length of {} characters", MAX_TEXT_LEN),
        ));
    }
    validate_lang(&payload.target_lang)?;

    let source_lang = match &payload.source_lang {
        Some(code) => {
            validate_lang(code)?;
            code.clone()
        }
        None => "auto".to_string(),
    };

    let provider_id = payload.provider.unwrap_or_default();
    let provider = state.registry.get(provider_id).map_err(provider_error)?;

    info!(
        provider = provider.name(),
        source = %source_lang,
        target = %payload.target_lang,
        "translating text"
    );

    let translation = provider
        .translate(&payload.text, &source_lang, &payload.target_lang)
        .await
        .map_err(provider_error)?;

    // Auto-detected sources are reported as English when unresolved
    let reported_source = if source_lang == "auto" { "en".to_string() } else { source_lang };

    Ok(Json(TranslateResponse {
        original_text: payload.text,
        translated_text: translation.text,
        source_lang: reported_source,
        target_lang: payload.target_lang,
        provider: provider.name().to_string(),
        confidence: translation.confidence,
        is_mock: provider.is_mock(),
    }))
}

/// `POST /api/translation/translate-image` (multipart)
pub async fn translate_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImageTranslateResponse>, ApiError> {
    let ocr = state.ocr.clone().ok_or_else(|| {
        detail(
            StatusCode::SERVICE_UNAVAILABLE,
            format!("OCR engine is not available. {}", OCR_INSTALL_HINT),
        )
    })?;

    let mut file: Option<(Vec<u8>, Option<String>)> = None;
    let mut target_lang: Option<String> = None;
    let mut source_lang: Option<String> = None;
    let mut provider_id = ProviderId::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| detail(StatusCode::BAD_REQUEST, format!("Malformed upload: {}", e)))?
    {
        match field.name() {
            Some("file") => {
                let content_type = field.content_type().map(|ct| ct.to_string());
                let bytes = field.bytes().await.map_err(|e| {
                    detail(StatusCode::BAD_REQUEST, format!("Failed to read upload: {}", e))
                })?;
                file = Some((bytes.to_vec(), content_type));
            }
            Some("target_lang") => target_lang = Some(read_text_field(field).await?),
            Some("source_lang") => source_lang = Some(read_text_field(field).await?),
            Some("provider") => {
                provider_id = read_text_field(field)
                    .await?
                    .parse()
                    .map_err(|e: TranslateError| {
                        detail(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
                    })?;
            }
            _ => {}
        }
    }

    let (image, content_type) = file
        .ok_or_else(|| detail(StatusCode::UNPROCESSABLE_ENTITY, "file field is required"))?;
    if !content_type.as_deref().is_some_and(|ct| ct.starts_with("image/")) {
        return Err(detail(StatusCode::BAD_REQUEST, "File must be an image"));
    }
    if image.len() > MAX_IMAGE_BYTES {
        return Err(detail(
            StatusCode::BAD_REQUEST,
            format!("Image exceeds the maximum size of {} bytes", MAX_IMAGE_BYTES),
        ));
    }

    let target_lang = target_lang
        .ok_or_else(|| detail(StatusCode::UNPROCESSABLE_ENTITY, "target_lang field is required"))?;
    validate_lang(&target_lang)?;
    if let Some(code) = &source_lang {
        validate_lang(code)?;
    }

    let extracted = ocr.recognize(&image).await.map_err(|e| {
        detail(StatusCode::INTERNAL_SERVER_ERROR, format!("Failed to process image: {}", e))
    })?;
    let extracted_text = extracted.text.trim().to_string();
    if extracted_text.is_empty() {
        return Err(detail(
            StatusCode::BAD_REQUEST,
            "No text found in image. Please upload an image with clear text.",
        ));
    }

    info!(
        engine = ocr.name(),
        chars = extracted_text.len(),
        confidence = ?extracted.confidence,
        "extracted text from image"
    );

    let provider = state.registry.get(provider_id).map_err(provider_error)?;
    let source = source_lang.clone().unwrap_or_else(|| "auto".to_string());
    let translation = provider
        .translate(&extracted_text, &source, &target_lang)
        .await
        .map_err(provider_error)?;

    let reported_source = if source == "auto" { "en".to_string() } else { source };

    Ok(Json(ImageTranslateResponse {
        extracted_text,
        translated_text: translation.text,
        source_lang: reported_source,
        target_lang,
        provider: provider.name().to_string(),
        ocr_confidence: extracted.confidence,
        is_mock: provider.is_mock(),
    }))
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| detail(StatusCode::BAD_REQUEST, format!("Malformed upload: {}", e)))
}

#[derive(Debug, Deserialize)]
pub struct DetectForm {
    pub text: String,
}

/// `POST /api/translation/detect-language` (form-encoded)
pub async fn detect_language(
    State(state): State<AppState>,
    Form(form): Form<DetectForm>,
) -> Result<Json<DetectionResponse>, ApiError> {
    if form.text.trim().is_empty() {
        return Err(detail(StatusCode::UNPROCESSABLE_ENTITY, "text must not be empty"));
    }

    let detection = state.registry.deep().detect(&form.text).await.map_err(|e| {
        detail(StatusCode::INTERNAL_SERVER_ERROR, format!("Language detection failed: {}", e))
    })?;

    let language_name =
        languages::name_of(&detection.lang).unwrap_or("Unknown").to_string();

    Ok(Json(DetectionResponse {
        detected_lang: detection.lang,
        language_name,
        confidence: detection.confidence,
    }))
}
