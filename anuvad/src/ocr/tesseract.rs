//! Tesseract OCR engine
//!
//! Runs the `tesseract` binary as a subprocess: the image bytes are written
//! to a temporary file and recognized with TSV output, which carries a
//! per-word confidence column. Word confidences are averaged into a single
//! score normalized to [0, 1].

use std::io::Write;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{TranslateError, TranslateResult};
use crate::ocr::{OcrEngine, OcrOutput};

const TESSERACT_BIN: &str = "tesseract";

/// OCR engine backed by the Tesseract command-line binary
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    /// Language packs passed via `-l`, joined with `+` (e.g. "eng+hin")
    languages: String,
}

impl TesseractEngine {
    /// Default language packs: English plus Hindi
    pub const DEFAULT_LANGUAGES: &'static str = "eng+hin";

    pub fn new(languages: impl Into<String>) -> Self {
        Self { languages: languages.into() }
    }

    /// Probe for a usable `tesseract` binary
    ///
    /// Returns `None` when the binary is missing or broken. Language packs
    /// come from `ANUVAD_OCR_LANGS` when set.
    pub async fn detect() -> Option<Self> {
        let languages = std::env::var("ANUVAD_OCR_LANGS")
            .unwrap_or_else(|_| Self::DEFAULT_LANGUAGES.to_string());

        match Command::new(TESSERACT_BIN).arg("--version").output().await {
            Ok(output) if output.status.success() => {
                let version = String::from_utf8_lossy(&output.stdout);
                info!(
                    version = %version.lines().next().unwrap_or("unknown"),
                    languages = %languages,
                    "tesseract available"
                );
                Some(Self::new(languages))
            }
            _ => None,
        }
    }

    pub fn languages(&self) -> &str {
        &self.languages
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    async fn recognize(&self, image: &[u8]) -> TranslateResult<OcrOutput> {
        if image.is_empty() {
            return Err(TranslateError::InvalidInput("Image is empty".to_string()));
        }

        // Tesseract reads from a file path, not stdin, for most formats
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(image)?;
        file.flush()?;

        let output = Command::new(TESSERACT_BIN)
            .arg(file.path())
            .arg("stdout")
            .args(["-l", &self.languages])
            .arg("tsv")
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TranslateError::OcrError(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let tsv = String::from_utf8_lossy(&output.stdout);
        let result = parse_tsv(&tsv);
        debug!(
            words = result.text.split_whitespace().count(),
            confidence = ?result.confidence,
            "ocr complete"
        );
        Ok(result)
    }
}

/// Extract recognized words and mean confidence from Tesseract TSV output
///
/// Word rows have level 5 and a non-negative confidence; everything else
/// (page/block/line structure, header) is skipped.
fn parse_tsv(tsv: &str) -> OcrOutput {
    let mut words: Vec<&str> = Vec::new();
    let mut confidences: Vec<f32> = Vec::new();

    for line in tsv.lines().skip(1) {
        let cols: Vec<&str> = line.split('\t').collect();
        if cols.len() < 12 || cols[0] != "5" {
            continue;
        }
        let conf: f32 = cols[10].parse().unwrap_or(-1.0);
        let word = cols[11].trim();
        if conf < 0.0 || word.is_empty() {
            continue;
        }
        words.push(word);
        confidences.push(conf);
    }

    let confidence = if confidences.is_empty() {
        None
    } else {
        Some(confidences.iter().sum::<f32>() / confidences.len() as f32 / 100.0)
    };

    OcrOutput { text: words.join(" "), confidence }
}
