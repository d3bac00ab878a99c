//! Mock provider for demos and tests
//!
//! Deterministic and network-free: the "translation" is the original text
//! prefixed with the uppercased target language code, e.g.
//! `"[HI] Parking Available"`. Results are flagged `is_mock` so the UI can
//! mark them as non-authoritative.

use async_trait::async_trait;

use crate::error::TranslateResult;
use crate::provider::{Translation, TranslationProvider};

#[derive(Debug, Clone, Default)]
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    async fn translate(
        &self,
        text: &str,
        _source_lang: &str,
        target_lang: &str,
    ) -> TranslateResult<Translation> {
        let marker = format!("[{}]", target_lang.to_uppercase());
        Ok(Translation { text: format!("{} {}", marker, text), confidence: Some(1.0) })
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn is_mock(&self) -> bool {
        true
    }
}
