//! Free translation provider
//!
//! Talks to the public `translate.googleapis.com/translate_a/single` endpoint
//! with `client=gtx`, the same endpoint the free deep-translator tooling uses.
//! No API key is required, which makes this the default provider. The
//! response is an untyped nested JSON array; parsing is isolated in
//! [`parse_gtx_body`] so it can be tested against canned payloads.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{TranslateError, TranslateResult};
use crate::provider::{Translation, TranslationProvider};

const GTX_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

// The endpoint rejects clients without a browser-looking user agent.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Confidence reported for successful free translations
const DEEP_CONFIDENCE: f32 = 0.95;

/// Fallback detection confidence when the endpoint does not report one
const DETECT_FALLBACK_CONFIDENCE: f32 = 0.9;

/// Outcome of language detection
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub lang: String,
    pub confidence: f32,
}

/// Keyless translation through the public Google endpoint
#[derive(Debug, Clone)]
pub struct DeepTranslateProvider {
    client: reqwest::Client,
    base_url: String,
}

impl DeepTranslateProvider {
    pub fn new() -> TranslateResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                TranslateError::NetworkError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, base_url: GTX_ENDPOINT.to_string() })
    }

    /// Point the provider at a different endpoint. Used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch(&self, text: &str, source: &str, target: &str) -> TranslateResult<GtxPayload> {
        let response = self
            .client
            .get(&self.base_url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(TranslateError::TranslationError(format!(
                "Translation endpoint returned {}",
                status
            )));
        }

        let body = response.text().await?;
        parse_gtx_body(&body)
    }

    /// Detect the language of `text`
    ///
    /// Uses the same endpoint with `sl=auto`; the detected language comes back
    /// alongside the translation.
    pub async fn detect(&self, text: &str) -> TranslateResult<Detection> {
        if text.trim().is_empty() {
            return Err(TranslateError::InvalidInput("Text is empty".to_string()));
        }

        let payload = self.fetch(text, "auto", "en").await?;
        let lang = payload.detected_lang.ok_or_else(|| {
            TranslateError::TranslationError(
                "Detection response did not include a language".to_string(),
            )
        })?;
        debug!(lang = %lang, "detected source language");

        Ok(Detection {
            lang,
            confidence: payload.confidence.unwrap_or(DETECT_FALLBACK_CONFIDENCE),
        })
    }
}

#[async_trait]
impl TranslationProvider for DeepTranslateProvider {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslateResult<Translation> {
        if text.is_empty() {
            return Ok(Translation { text: String::new(), confidence: None });
        }

        let payload = self.fetch(text, source_lang, target_lang).await?;

        Ok(Translation { text: payload.text, confidence: Some(DEEP_CONFIDENCE) })
    }

    fn name(&self) -> &str {
        "deep-translator"
    }
}

/// Parsed fields of a gtx response
#[derive(Debug, Clone, PartialEq)]
struct GtxPayload {
    text: String,
    detected_lang: Option<String>,
    confidence: Option<f32>,
}

/// Parse the nested-array body returned by the gtx endpoint
///
/// Shape: `[[[translated, original, ...], ...], null, detected_lang, ...]`.
/// Segment texts are concatenated; the detected language sits at index 2 and
/// an optional confidence float at index 6.
fn parse_gtx_body(body: &str) -> TranslateResult<GtxPayload> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        TranslateError::TranslationError(format!("Unparseable translation response: {}", e))
    })?;

    let segments = value.get(0).and_then(|v| v.as_array()).ok_or_else(|| {
        TranslateError::TranslationError("Unexpected translation response shape".to_string())
    })?;

    let mut text = String::new();
    for segment in segments {
        if let Some(part) = segment.get(0).and_then(|v| v.as_str()) {
            text.push_str(part);
        }
    }

    let detected_lang = value.get(2).and_then(|v| v.as_str()).map(|s| s.to_string());
    let confidence = value.get(6).and_then(|v| v.as_f64()).map(|c| c as f32);

    Ok(GtxPayload { text, detected_lang, confidence })
}
