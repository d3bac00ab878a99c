//! Google Cloud Translation API provider
//!
//! Integrates with Google Translate API v2 for paid, authenticated
//! translation. The API key is loaded from the `GOOGLE_TRANSLATE_API_KEY`
//! environment variable; obtain one from https://console.cloud.google.com/

use async_trait::async_trait;
use serde_json::json;

use crate::error::{TranslateError, TranslateResult};
use crate::provider::{Translation, TranslationProvider};

/// Google Translate API v2 provider
#[derive(Clone)]
pub struct GoogleTranslateProvider {
    /// API key for authentication
    api_key: String,
    /// HTTP client for async requests
    client: reqwest::Client,
    /// Base URL for the Google Translate API
    base_url: String,
}

impl GoogleTranslateProvider {
    /// Maximum characters per request, matching the service-wide input cap
    const MAX_CHARS: usize = crate::api::MAX_TEXT_LEN;

    /// Confidence reported for successful API translations. The v2 API does
    /// not return a per-request score.
    const CONFIDENCE: f32 = 0.9;

    /// Create a provider with an explicit API key
    pub fn new(api_key: String) -> TranslateResult<Self> {
        if api_key.trim().is_empty() {
            return Err(TranslateError::ConfigError("API key cannot be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                TranslateError::NetworkError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            api_key,
            client,
            base_url: "https://translation.googleapis.com/language/translate/v2".to_string(),
        })
    }

    /// Create a provider from the `GOOGLE_TRANSLATE_API_KEY` environment variable
    pub fn from_env() -> TranslateResult<Self> {
        let api_key = std::env::var("GOOGLE_TRANSLATE_API_KEY").map_err(|_| {
            TranslateError::ConfigError(
                "GOOGLE_TRANSLATE_API_KEY environment variable not set".to_string(),
            )
        })?;

        Self::new(api_key)
    }

    async fn request_translation(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslateResult<String> {
        let url = format!("{}?key={}", self.base_url, self.api_key);

        // "auto" is expressed by omitting the source field
        let mut body = json!({
            "q": [text],
            "target": target_lang,
            "format": "text"
        });
        if source_lang != "auto" {
            body["source"] = json!(source_lang);
        }

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text =
                response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            return Err(if status.is_client_error() {
                TranslateError::ConfigError(format!(
                    "API client error ({}): {}",
                    status, error_text
                ))
            } else {
                TranslateError::TranslationError(format!(
                    "API server error ({}): {}",
                    status, error_text
                ))
            });
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            TranslateError::TranslationError(format!("Failed to parse API response: {}", e))
        })?;

        json["data"]["translations"]
            .get(0)
            .and_then(|t| t["translatedText"].as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                TranslateError::TranslationError(
                    "Invalid API response: missing 'translatedText' field".to_string(),
                )
            })
    }
}

impl std::fmt::Debug for GoogleTranslateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslateProvider")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslateProvider {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslateResult<Translation> {
        if text.is_empty() {
            return Ok(Translation { text: String::new(), confidence: None });
        }

        if text.len() > Self::MAX_CHARS {
            return Err(TranslateError::InvalidInput(format!(
                "Text exceeds maximum length of {} characters",
                Self::MAX_CHARS
            )));
        }

        let translated = self.request_translation(text, source_lang, target_lang).await?;

        Ok(Translation { text: translated, confidence: Some(Self::CONFIDENCE) })
    }

    fn name(&self) -> &str {
        "google-translate"
    }
}
