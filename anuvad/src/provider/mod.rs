//! Translation providers
//!
//! A provider is a selectable backend translation engine. Three are built in:
//!
//! 1. **deep** - keyless translation through the public Google endpoint
//!    (the default, no credentials needed)
//! 2. **google** - Google Cloud Translation v2, requires an API key
//! 3. **mock** - deterministic placeholder output for demos and tests
//!
//! All providers implement [`TranslationProvider`] so callers never couple to
//! a specific engine.

pub mod deep;
pub mod google;
pub mod mock;

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{TranslateError, TranslateResult};

pub use deep::{DeepTranslateProvider, Detection};
pub use google::GoogleTranslateProvider;
pub use mock::MockProvider;

/// Identifier for a selectable translation backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// Free translation, no API key needed (default)
    #[default]
    Deep,
    /// Google Cloud Translation API (requires setup)
    Google,
    /// Demo mode, returns a clearly-marked placeholder
    Mock,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Deep => "deep",
            ProviderId::Google => "google",
            ProviderId::Mock => "mock",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deep" => Ok(ProviderId::Deep),
            "google" => Ok(ProviderId::Google),
            "mock" => Ok(ProviderId::Mock),
            other => Err(TranslateError::InvalidInput(format!(
                "Unknown provider '{}'. Expected one of: deep, google, mock",
                other
            ))),
        }
    }
}

/// A completed translation as reported by a provider
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub text: String,
    /// Provider-reported confidence in [0, 1], absent when not reported
    pub confidence: Option<f32>,
}

/// Generic trait for translation backends
///
/// Implementations handle the actual translation work, whether through an
/// HTTP API or deterministic logic. All methods are async to support
/// I/O-bound operations like network requests.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Translate `text` from `source_lang` to `target_lang`
    ///
    /// `source_lang` may be `"auto"`, in which case the provider detects the
    /// source language itself.
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslateResult<Translation>;

    /// Provider name as reported on the wire
    /// (e.g. "deep-translator", "google-translate", "mock")
    fn name(&self) -> &str;

    /// Whether results from this provider are placeholder output
    fn is_mock(&self) -> bool {
        false
    }
}

/// The set of providers configured for this process
///
/// `deep` and `mock` are always present. `google` is present only when the
/// `GOOGLE_TRANSLATE_API_KEY` environment variable was set at startup;
/// selecting it otherwise yields a `ConfigError`.
pub struct ProviderRegistry {
    deep: Arc<DeepTranslateProvider>,
    google: Option<Arc<GoogleTranslateProvider>>,
    mock: Arc<MockProvider>,
}

impl ProviderRegistry {
    /// Build the registry, picking up optional credentials from the environment
    pub fn from_env() -> TranslateResult<Self> {
        let google = match GoogleTranslateProvider::from_env() {
            Ok(provider) => Some(Arc::new(provider)),
            Err(_) => None,
        };
        Ok(Self {
            deep: Arc::new(DeepTranslateProvider::new()?),
            google,
            mock: Arc::new(MockProvider::new()),
        })
    }

    /// Resolve a provider id to a usable provider
    pub fn get(&self, id: ProviderId) -> TranslateResult<Arc<dyn TranslationProvider>> {
        match id {
            ProviderId::Deep => Ok(self.deep.clone()),
            ProviderId::Google => self
                .google
                .clone()
                .map(|p| p as Arc<dyn TranslationProvider>)
                .ok_or_else(|| {
                    TranslateError::ConfigError(
                        "Google Translate API not available. Set GOOGLE_TRANSLATE_API_KEY."
                            .to_string(),
                    )
                }),
            ProviderId::Mock => Ok(self.mock.clone()),
        }
    }

    pub fn google_available(&self) -> bool {
        self.google.is_some()
    }

    /// The always-available free provider, also used for language detection
    pub fn deep(&self) -> &DeepTranslateProvider {
        &self.deep
    }
}
