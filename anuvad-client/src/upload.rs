//! Upload preparation
//!
//! Converts a locally selected image into a transferable payload plus a
//! data-URL preview, independent of any network state. The preparer holds at
//! most one selection; preparing a new file replaces the previous one. The
//! session controller only enables image submission once a prepared payload
//! (preview included) exists.

use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use anuvad::api::MAX_IMAGE_BYTES;

/// Errors raised while preparing an upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// Extension is not a recognized image type (advisory check only)
    NotAnImage(String),
    /// File exceeds the upload size cap
    TooLarge(u64),
    /// Reading the file failed
    Io(String),
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadError::NotAnImage(name) => {
                write!(f, "'{}' does not look like an image file", name)
            }
            UploadError::TooLarge(size) => write!(
                f,
                "Image is {} bytes; the limit is {} bytes",
                size, MAX_IMAGE_BYTES
            ),
            UploadError::Io(msg) => write!(f, "Could not read file: {}", msg),
        }
    }
}

impl std::error::Error for UploadError {}

/// An image ready to be submitted, with its local preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
    /// `data:<mime>;base64,...` string for local display
    pub preview: String,
}

/// Holds the single current image selection
#[derive(Debug, Default)]
pub struct UploadPreparer {
    current: Option<PreparedUpload>,
}

impl UploadPreparer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and stage the image at `path`, replacing any prior selection
    ///
    /// The payload and the preview are produced together, so once this
    /// returns the selection is fully usable.
    pub async fn prepare(&mut self, path: &Path) -> Result<&PreparedUpload, UploadError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let mime = mime_for(path).ok_or_else(|| UploadError::NotAnImage(file_name.clone()))?;

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| UploadError::Io(e.to_string()))?;
        if metadata.len() > MAX_IMAGE_BYTES as u64 {
            return Err(UploadError::TooLarge(metadata.len()));
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| UploadError::Io(e.to_string()))?;

        let preview = format!("data:{};base64,{}", mime, BASE64.encode(&bytes));

        self.current = Some(PreparedUpload { file_name, mime: mime.to_string(), bytes, preview });
        Ok(self.current.as_ref().unwrap())
    }

    /// Release the payload and preview so the same file can be re-selected
    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn prepared(&self) -> Option<&PreparedUpload> {
        self.current.as_ref()
    }
}

/// Advisory extension-to-MIME mapping for accepted image types
fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "webp" => Some("image/webp"),
        "tif" | "tiff" => Some("image/tiff"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_image(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(bytes).unwrap();
        path
    }

    #[tokio::test]
    async fn test_prepare_produces_payload_and_preview() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp_image(&dir, "sign.png", b"\x89PNG\r\n\x1a\nfake");

        let mut preparer = UploadPreparer::new();
        let upload = preparer.prepare(&path).await.unwrap();

        assert_eq!(upload.file_name, "sign.png");
        assert_eq!(upload.mime, "image/png");
        assert_eq!(upload.bytes, b"\x89PNG\r\n\x1a\nfake");
        assert!(upload.preview.starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn test_prepare_replaces_previous_selection() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_temp_image(&dir, "a.png", b"first");
        let second = write_temp_image(&dir, "b.jpg", b"second");

        let mut preparer = UploadPreparer::new();
        preparer.prepare(&first).await.unwrap();
        preparer.prepare(&second).await.unwrap();

        let current = preparer.prepared().unwrap();
        assert_eq!(current.file_name, "b.jpg");
        assert_eq!(current.mime, "image/jpeg");
    }

    #[tokio::test]
    async fn test_prepare_rejects_non_image_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp_image(&dir, "notes.txt", b"hello");

        let mut preparer = UploadPreparer::new();
        let err = preparer.prepare(&path).await.unwrap_err();
        assert!(matches!(err, UploadError::NotAnImage(_)));
        assert!(preparer.prepared().is_none());
    }

    #[tokio::test]
    async fn test_prepare_rejects_missing_file() {
        let mut preparer = UploadPreparer::new();
        let err = preparer.prepare(Path::new("/nonexistent/sign.png")).await.unwrap_err();
        assert!(matches!(err, UploadError::Io(_)));
    }

    #[tokio::test]
    async fn test_clear_releases_selection() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp_image(&dir, "sign.png", b"data");

        let mut preparer = UploadPreparer::new();
        preparer.prepare(&path).await.unwrap();
        assert!(preparer.prepared().is_some());

        preparer.clear();
        assert!(preparer.prepared().is_none());
    }

    #[test]
    fn test_mime_for_case_insensitive() {
        assert_eq!(mime_for(Path::new("photo.JPG")), Some("image/jpeg"));
        assert_eq!(mime_for(Path::new("scan.TIFF")), Some("image/tiff"));
        assert_eq!(mime_for(Path::new("doc.pdf")), None);
        assert_eq!(mime_for(Path::new("noext")), None);
    }
}
