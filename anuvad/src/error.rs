/// Error types for translation and OCR operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// Missing or invalid configuration (API key, provider not set up)
    ConfigError(String),
    /// Transport-level failure talking to an upstream service
    NetworkError(String),
    /// The upstream translation engine rejected or failed the request
    TranslationError(String),
    /// Text extraction from an image failed or the engine is unusable
    OcrError(String),
    /// A language code outside the supported set
    UnsupportedLanguage(String),
    /// Input rejected before reaching any provider
    InvalidInput(String),
}

impl std::fmt::Display for TranslateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslateError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            TranslateError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            TranslateError::TranslationError(msg) => write!(f, "Translation failed: {}", msg),
            TranslateError::OcrError(msg) => write!(f, "OCR failed: {}", msg),
            TranslateError::UnsupportedLanguage(msg) => write!(f, "Unsupported language: {}", msg),
            TranslateError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for TranslateError {}

impl From<reqwest::Error> for TranslateError {
    fn from(err: reqwest::Error) -> Self {
        TranslateError::NetworkError(err.to_string())
    }
}

impl From<std::io::Error> for TranslateError {
    fn from(err: std::io::Error) -> Self {
        TranslateError::OcrError(err.to_string())
    }
}

/// Result type for translation and OCR operations
pub type TranslateResult<T> = Result<T, TranslateError>;
