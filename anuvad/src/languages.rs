//! Supported language registry
//!
//! The service exposes a closed set of language codes (English plus eight
//! Indian languages). Every lookup in the crate goes through this registry so
//! the wire contract, the OCR language packs, and the UI stay in agreement.

/// A supported language: ISO 639-1 code plus English display name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

/// All supported languages, in the order the UI presents them
pub const LANGUAGES: [Language; 9] = [
    Language { code: "en", name: "English" },
    Language { code: "hi", name: "Hindi" },
    Language { code: "bn", name: "Bengali" },
    Language { code: "ta", name: "Tamil" },
    Language { code: "te", name: "Telugu" },
    Language { code: "mr", name: "Marathi" },
    Language { code: "kn", name: "Kannada" },
    Language { code: "ml", name: "Malayalam" },
    Language { code: "gu", name: "Gujarati" },
];

/// Look up the display name for a language code
pub fn name_of(code: &str) -> Option<&'static str> {
    LANGUAGES.iter().find(|l| l.code == code).map(|l| l.name)
}

/// Whether a code belongs to the supported set
pub fn is_supported(code: &str) -> bool {
    LANGUAGES.iter().any(|l| l.code == code)
}
