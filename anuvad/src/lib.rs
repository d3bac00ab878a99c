//! # anuvad
//!
//! Text and image translation for Indian languages.
//!
//! This crate is the core of the anuvad service: a closed registry of nine
//! supported languages, a provider abstraction over three translation
//! backends (free, Google Cloud API, mock), an OCR seam backed by the
//! Tesseract binary, and the wire-contract types shared by the HTTP service
//! (`anuvad-web`) and the client orchestration crate (`anuvad-client`).
//!
//! # Example
//!
//! ```ignore
//! use anuvad::provider::{ProviderId, ProviderRegistry};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = ProviderRegistry::from_env()?;
//!     let provider = registry.get(ProviderId::Deep)?;
//!
//!     let result = provider.translate("Parking Available", "en", "hi").await?;
//!     println!("{}", result.text); // "पार्किंग उपलब्ध है"
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod error;
pub mod languages;
pub mod ocr;
pub mod provider;

pub use error::{TranslateError, TranslateResult};
pub use languages::{LANGUAGES, Language};
pub use ocr::{OcrEngine, OcrOutput, TesseractEngine};
pub use provider::{
    DeepTranslateProvider, Detection, GoogleTranslateProvider, MockProvider, ProviderId,
    ProviderRegistry, Translation, TranslationProvider,
};
