//! Provider gateway
//!
//! The boundary between client orchestration and the translation service.
//! [`TranslationGateway`] is the one contract the session controller talks
//! to; [`HttpGateway`] implements it over the REST wire protocol. Failures
//! are normalized into [`GatewayError`] values so callers never see
//! transport-library types.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use anuvad::api::{ErrorBody, ImageTranslateResponse, StatusResponse, TranslateRequest,
    TranslateResponse};
use anuvad::provider::ProviderId;

use crate::upload::PreparedUpload;

/// Failure classes a gateway call can surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    /// Network unreachable, timeout, connection refused
    Transport,
    /// The service or an upstream provider rejected the request
    Provider,
    /// Image translation requested but no OCR engine is installed
    OcrUnavailable,
}

/// A normalized gateway failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayError {
    pub kind: GatewayErrorKind,
    pub message: String,
}

impl GatewayError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self { kind: GatewayErrorKind::Transport, message: message.into() }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self { kind: GatewayErrorKind::Provider, message: message.into() }
    }

    pub fn ocr_unavailable(message: impl Into<String>) -> Self {
        Self { kind: GatewayErrorKind::OcrUnavailable, message: message.into() }
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for GatewayError {}

/// Result of the availability probe
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Availability {
    pub ocr_available: bool,
    pub engine: Option<String>,
    pub guidance: Option<String>,
}

/// Parameters accompanying an image translation
#[derive(Debug, Clone)]
pub struct ImageParams {
    pub target_lang: String,
    pub source_lang: Option<String>,
    pub provider: ProviderId,
}

/// Contract between the session controller and the translation service
#[async_trait]
pub trait TranslationGateway: Send + Sync {
    async fn translate_text(
        &self,
        request: &TranslateRequest,
    ) -> Result<TranslateResponse, GatewayError>;

    async fn translate_image(
        &self,
        upload: &PreparedUpload,
        params: &ImageParams,
    ) -> Result<ImageTranslateResponse, GatewayError>;

    async fn check_availability(&self) -> Result<Availability, GatewayError>;
}

#[async_trait]
impl<G: TranslationGateway + ?Sized> TranslationGateway for Arc<G> {
    async fn translate_text(
        &self,
        request: &TranslateRequest,
    ) -> Result<TranslateResponse, GatewayError> {
        (**self).translate_text(request).await
    }

    async fn translate_image(
        &self,
        upload: &PreparedUpload,
        params: &ImageParams,
    ) -> Result<ImageTranslateResponse, GatewayError> {
        (**self).translate_image(upload, params).await
    }

    async fn check_availability(&self) -> Result<Availability, GatewayError> {
        (**self).check_availability().await
    }
}

/// Gateway over the REST wire protocol
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    /// Create a gateway against a service base URL (e.g. "http://127.0.0.1:8000")
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| GatewayError::transport(format!("Failed to create HTTP client: {}", e)))?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/translation/{}", self.base_url, path)
    }

    /// Turn a non-2xx response into a GatewayError, preferring the service's
    /// `detail` text over a generic status line.
    async fn error_from_response(
        response: reqwest::Response,
        ocr_endpoint: bool,
    ) -> GatewayError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.detail)
            .unwrap_or_else(|_| format!("Translation service returned {}", status));

        if ocr_endpoint && status == reqwest::StatusCode::SERVICE_UNAVAILABLE {
            GatewayError::ocr_unavailable(message)
        } else {
            GatewayError::provider(message)
        }
    }
}

#[async_trait]
impl TranslationGateway for HttpGateway {
    async fn translate_text(
        &self,
        request: &TranslateRequest,
    ) -> Result<TranslateResponse, GatewayError> {
        debug!(target_lang = %request.target_lang, "submitting text translation");
        let response = self
            .client
            .post(self.endpoint("simple"))
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response, false).await);
        }

        response
            .json::<TranslateResponse>()
            .await
            .map_err(|e| GatewayError::provider(format!("Unexpected service response: {}", e)))
    }

    async fn translate_image(
        &self,
        upload: &PreparedUpload,
        params: &ImageParams,
    ) -> Result<ImageTranslateResponse, GatewayError> {
        debug!(file = %upload.file_name, "submitting image translation");
        let part = reqwest::multipart::Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.mime)
            .map_err(|e| GatewayError::provider(format!("Invalid upload type: {}", e)))?;

        let mut form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("target_lang", params.target_lang.clone())
            .text("provider", params.provider.to_string());
        if let Some(source) = &params.source_lang {
            form = form.text("source_lang", source.clone());
        }

        let response = self
            .client
            .post(self.endpoint("translate-image"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| GatewayError::transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response, true).await);
        }

        response
            .json::<ImageTranslateResponse>()
            .await
            .map_err(|e| GatewayError::provider(format!("Unexpected service response: {}", e)))
    }

    async fn check_availability(&self) -> Result<Availability, GatewayError> {
        let response = self
            .client
            .get(self.endpoint("status"))
            .send()
            .await
            .map_err(|e| GatewayError::transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response, false).await);
        }

        let status = response
            .json::<StatusResponse>()
            .await
            .map_err(|e| GatewayError::provider(format!("Unexpected service response: {}", e)))?;

        Ok(Availability {
            ocr_available: status.image_translation.available,
            engine: status.image_translation.engine,
            guidance: status.image_translation.installation_guide,
        })
    }
}
