//! Translation session controller
//!
//! Owns all per-session state: the pending request fields, the independent
//! text and image submission state machines, the upload preparer, and the
//! bounded history. Each mode moves `Idle -> Submitting -> Succeeded|Failed`
//! and back through `Submitting` on resubmission. While a mode is
//! `Submitting` no second submission of that mode is accepted, so responses
//! for a mode always apply in issuance order; a token guards against a stale
//! response landing after a newer submission anyway.
//!
//! Everything here is synchronous except the gateway calls and the upload
//! read; the controller is single-threaded by construction.

use std::mem;
use std::path::Path;

use tracing::{debug, warn};

use anuvad::api::{ImageTranslateResponse, TranslateRequest, TranslateResponse};
use anuvad::provider::ProviderId;

use crate::gateway::{
    Availability, GatewayError, GatewayErrorKind, ImageParams, TranslationGateway,
};
use crate::history::{HistoryEntry, HistoryStore, NewEntry};
use crate::upload::{PreparedUpload, UploadError, UploadPreparer};

/// Submission lifecycle of one mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// What the OCR availability probe has established so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OcrProbe {
    /// Probe has not completed (or failed); assume available, show no warning
    #[default]
    Unknown,
    Available,
    Unavailable,
}

/// A completed translation, unified across text and image responses
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationOutcome {
    pub original_text: String,
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub provider: String,
    pub confidence: Option<f32>,
    pub ocr_confidence: Option<f32>,
    pub is_mock: bool,
}

impl From<TranslateResponse> for TranslationOutcome {
    fn from(resp: TranslateResponse) -> Self {
        Self {
            original_text: resp.original_text,
            translated_text: resp.translated_text,
            source_lang: resp.source_lang,
            target_lang: resp.target_lang,
            provider: resp.provider,
            confidence: resp.confidence,
            ocr_confidence: None,
            is_mock: resp.is_mock,
        }
    }
}

impl From<ImageTranslateResponse> for TranslationOutcome {
    fn from(resp: ImageTranslateResponse) -> Self {
        Self {
            original_text: resp.extracted_text,
            translated_text: resp.translated_text,
            source_lang: resp.source_lang,
            target_lang: resp.target_lang,
            provider: resp.provider,
            confidence: None,
            ocr_confidence: resp.ocr_confidence,
            is_mock: resp.is_mock,
        }
    }
}

/// Per-mode submission state: phase, last result, last error, request token
#[derive(Debug, Default)]
pub struct ModeState {
    phase: Phase,
    result: Option<TranslationOutcome>,
    error: Option<String>,
    token: u64,
}

impl ModeState {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn result(&self) -> Option<&TranslationOutcome> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn begin(&mut self) -> u64 {
        self.phase = Phase::Submitting;
        self.token += 1;
        self.token
    }

    fn succeed(&mut self, outcome: TranslationOutcome) {
        self.phase = Phase::Succeeded;
        self.result = Some(outcome);
        self.error = None;
    }

    fn fail(&mut self, message: String) {
        self.phase = Phase::Failed;
        self.error = Some(message);
    }
}

/// Why a submission was rejected before reaching the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// Text input is empty or whitespace
    EmptyText,
    /// No prepared image payload
    NoImage,
    /// A same-mode request is already in flight
    InFlight,
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::EmptyText => f.write_str("Enter some text to translate"),
            SubmitError::NoImage => f.write_str("Select an image first"),
            SubmitError::InFlight => f.write_str("A translation is already in progress"),
        }
    }
}

impl std::error::Error for SubmitError {}

/// A text submission handed off to the gateway
#[derive(Debug, Clone)]
pub struct PendingText {
    pub token: u64,
    pub request: TranslateRequest,
}

/// An image submission handed off to the gateway
#[derive(Debug, Clone)]
pub struct PendingImage {
    pub token: u64,
    pub upload: PreparedUpload,
    pub params: ImageParams,
}

const TEXT_FAILURE_FALLBACK: &str = "Translation failed. Please try again.";
const IMAGE_FAILURE_FALLBACK: &str = "Image translation failed. Please try again.";

/// Session-scoped orchestration between the UI state and the gateway
pub struct SessionController<G: TranslationGateway> {
    gateway: G,
    source_lang: String,
    target_lang: String,
    provider: ProviderId,
    text_input: String,
    uploads: UploadPreparer,
    text: ModeState,
    image: ModeState,
    history: HistoryStore,
    history_open: bool,
    ocr_probe: OcrProbe,
    ocr_guidance: Option<String>,
}

impl<G: TranslationGateway> SessionController<G> {
    /// New session with defaults: English -> Hindi, free provider
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            source_lang: "en".to_string(),
            target_lang: "hi".to_string(),
            provider: ProviderId::default(),
            text_input: String::new(),
            uploads: UploadPreparer::new(),
            text: ModeState::default(),
            image: ModeState::default(),
            history: HistoryStore::new(),
            history_open: false,
            ocr_probe: OcrProbe::default(),
            ocr_guidance: None,
        }
    }

    // ----- request parameter accessors -----

    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    pub fn provider(&self) -> ProviderId {
        self.provider
    }

    pub fn text_input(&self) -> &str {
        &self.text_input
    }

    pub fn set_source_lang(&mut self, code: impl Into<String>) {
        self.source_lang = code.into();
    }

    pub fn set_target_lang(&mut self, code: impl Into<String>) {
        self.target_lang = code.into();
    }

    pub fn set_provider(&mut self, provider: ProviderId) {
        self.provider = provider;
    }

    pub fn set_text_input(&mut self, text: impl Into<String>) {
        self.text_input = text.into();
    }

    /// Exchange source and target languages. Valid in any state; never
    /// triggers a request.
    pub fn swap_languages(&mut self) {
        mem::swap(&mut self.source_lang, &mut self.target_lang);
    }

    // ----- mode state -----

    pub fn text_state(&self) -> &ModeState {
        &self.text
    }

    pub fn image_state(&self) -> &ModeState {
        &self.image
    }

    pub fn can_submit_text(&self) -> bool {
        self.text.phase != Phase::Submitting && !self.text_input.trim().is_empty()
    }

    pub fn can_submit_image(&self) -> bool {
        self.image.phase != Phase::Submitting && self.uploads.prepared().is_some()
    }

    // ----- uploads -----

    pub async fn prepare_upload(&mut self, path: &Path) -> Result<(), UploadError> {
        self.uploads.prepare(path).await.map(|_| ())
    }

    pub fn clear_upload(&mut self) {
        self.uploads.clear();
    }

    pub fn prepared_upload(&self) -> Option<&PreparedUpload> {
        self.uploads.prepared()
    }

    // ----- text submission -----

    /// Guard and stage a text submission
    ///
    /// Rejects while a text request is in flight and when the input is
    /// blank. On success the text mode enters `Submitting` and the returned
    /// snapshot carries the token the response must present.
    pub fn begin_text_submission(&mut self) -> Result<PendingText, SubmitError> {
        if self.text.phase == Phase::Submitting {
            return Err(SubmitError::InFlight);
        }
        if self.text_input.trim().is_empty() {
            return Err(SubmitError::EmptyText);
        }

        let token = self.text.begin();
        Ok(PendingText {
            token,
            request: TranslateRequest {
                text: self.text_input.clone(),
                target_lang: self.target_lang.clone(),
                source_lang: Some(self.source_lang.clone()),
                provider: Some(self.provider),
            },
        })
    }

    /// Apply the gateway's answer to a text submission
    ///
    /// A token that is not the latest issued one identifies a stale response
    /// and is discarded. Success replaces result and error atomically and
    /// appends to history; failure records a user-facing message and leaves
    /// history untouched.
    pub fn apply_text_response(
        &mut self,
        token: u64,
        response: Result<TranslateResponse, GatewayError>,
    ) {
        if token != self.text.token {
            debug!(token, latest = self.text.token, "discarding stale text response");
            return;
        }

        match response {
            Ok(resp) => {
                let outcome = TranslationOutcome::from(resp);
                self.history.push(NewEntry {
                    original_text: outcome.original_text.clone(),
                    translated_text: outcome.translated_text.clone(),
                    source_lang: outcome.source_lang.clone(),
                    target_lang: outcome.target_lang.clone(),
                    provider: outcome.provider.clone(),
                    is_image: false,
                });
                self.text.succeed(outcome);
            }
            Err(err) => {
                warn!(kind = ?err.kind, "text translation failed: {}", err);
                self.text.fail(user_message(&err, TEXT_FAILURE_FALLBACK));
            }
        }
    }

    /// Full text submission: guard, gateway call, state update
    pub async fn submit_text(&mut self) -> Result<(), SubmitError> {
        let pending = self.begin_text_submission()?;
        let response = self.gateway.translate_text(&pending.request).await;
        self.apply_text_response(pending.token, response);
        Ok(())
    }

    // ----- image submission -----

    /// Guard and stage an image submission; requires a fully prepared upload
    pub fn begin_image_submission(&mut self) -> Result<PendingImage, SubmitError> {
        if self.image.phase == Phase::Submitting {
            return Err(SubmitError::InFlight);
        }
        let upload = self.uploads.prepared().ok_or(SubmitError::NoImage)?.clone();

        let token = self.image.begin();
        Ok(PendingImage {
            token,
            upload,
            params: ImageParams {
                target_lang: self.target_lang.clone(),
                source_lang: Some(self.source_lang.clone()),
                provider: self.provider,
            },
        })
    }

    /// Apply the gateway's answer to an image submission
    pub fn apply_image_response(
        &mut self,
        token: u64,
        response: Result<ImageTranslateResponse, GatewayError>,
    ) {
        if token != self.image.token {
            debug!(token, latest = self.image.token, "discarding stale image response");
            return;
        }

        match response {
            Ok(resp) => {
                let outcome = TranslationOutcome::from(resp);
                self.history.push(NewEntry {
                    original_text: outcome.original_text.clone(),
                    translated_text: outcome.translated_text.clone(),
                    source_lang: outcome.source_lang.clone(),
                    target_lang: outcome.target_lang.clone(),
                    provider: outcome.provider.clone(),
                    is_image: true,
                });
                self.image.succeed(outcome);
            }
            Err(err) => {
                warn!(kind = ?err.kind, "image translation failed: {}", err);
                if err.kind == GatewayErrorKind::OcrUnavailable {
                    self.ocr_probe = OcrProbe::Unavailable;
                }
                self.image.fail(user_message(&err, IMAGE_FAILURE_FALLBACK));
            }
        }
    }

    /// Full image submission: guard, gateway call, state update
    pub async fn submit_image(&mut self) -> Result<(), SubmitError> {
        let pending = self.begin_image_submission()?;
        let response = self.gateway.translate_image(&pending.upload, &pending.params).await;
        self.apply_image_response(pending.token, response);
        Ok(())
    }

    // ----- history -----

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub fn open_history(&mut self) {
        self.history_open = true;
    }

    pub fn close_history(&mut self) {
        self.history_open = false;
    }

    /// Rehydrate languages and original text from a past exchange
    ///
    /// Does not re-trigger translation; the user resubmits explicitly.
    /// Closes the history view. Returns false for an unknown id.
    pub fn load_from_history(&mut self, id: u64) -> bool {
        let Some(entry) = self.history.get(id) else {
            return false;
        };
        let (source, target, text) = (
            entry.source_lang.clone(),
            entry.target_lang.clone(),
            entry.original_text.clone(),
        );

        self.source_lang = source;
        self.target_lang = target;
        self.text_input = text;
        self.history_open = false;
        true
    }

    /// Most recent history entry, if any
    pub fn latest_entry(&self) -> Option<&HistoryEntry> {
        self.history.newest()
    }

    // ----- availability -----

    /// Probe the service once at session start
    ///
    /// A failed probe is non-fatal: the probe result stays `Unknown` and no
    /// unavailability warning is shown until a later probe explicitly
    /// reports the engine missing.
    pub async fn probe_availability(&mut self) {
        match self.gateway.check_availability().await {
            Ok(availability) => self.apply_availability(availability),
            Err(err) => {
                warn!("availability probe failed: {}", err);
            }
        }
    }

    fn apply_availability(&mut self, availability: Availability) {
        self.ocr_probe = if availability.ocr_available {
            OcrProbe::Available
        } else {
            OcrProbe::Unavailable
        };
        self.ocr_guidance = availability.guidance;
    }

    pub fn ocr_probe(&self) -> OcrProbe {
        self.ocr_probe
    }

    /// Warning text for the image mode banner
    ///
    /// Present only once a probe (or an image submission) has explicitly
    /// established that no OCR engine is installed.
    pub fn ocr_warning(&self) -> Option<&str> {
        match self.ocr_probe {
            OcrProbe::Unavailable => {
                Some(self.ocr_guidance.as_deref().unwrap_or(anuvad::ocr::OCR_INSTALL_HINT))
            }
            _ => None,
        }
    }
}

/// Prefer the service-supplied detail text, fall back to a generic
/// mode-specific message.
fn user_message(err: &GatewayError, fallback: &str) -> String {
    if err.message.trim().is_empty() {
        fallback.to_string()
    } else {
        err.message.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    /// Gateway double with scripted responses and call counters
    #[derive(Default)]
    struct ScriptedGateway {
        text_responses: Mutex<VecDeque<Result<TranslateResponse, GatewayError>>>,
        image_responses: Mutex<VecDeque<Result<ImageTranslateResponse, GatewayError>>>,
        availability: Mutex<Option<Result<Availability, GatewayError>>>,
        text_calls: AtomicUsize,
        image_calls: AtomicUsize,
    }

    impl ScriptedGateway {
        fn push_text(&self, response: Result<TranslateResponse, GatewayError>) {
            self.text_responses.lock().unwrap().push_back(response);
        }

        fn push_image(&self, response: Result<ImageTranslateResponse, GatewayError>) {
            self.image_responses.lock().unwrap().push_back(response);
        }

        fn set_availability(&self, response: Result<Availability, GatewayError>) {
            *self.availability.lock().unwrap() = Some(response);
        }

        fn text_calls(&self) -> usize {
            self.text_calls.load(Ordering::SeqCst)
        }

        fn image_calls(&self) -> usize {
            self.image_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TranslationGateway for ScriptedGateway {
        async fn translate_text(
            &self,
            _request: &TranslateRequest,
        ) -> Result<TranslateResponse, GatewayError> {
            self.text_calls.fetch_add(1, Ordering::SeqCst);
            self.text_responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::provider("no scripted response")))
        }

        async fn translate_image(
            &self,
            _upload: &PreparedUpload,
            _params: &ImageParams,
        ) -> Result<ImageTranslateResponse, GatewayError> {
            self.image_calls.fetch_add(1, Ordering::SeqCst);
            self.image_responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::provider("no scripted response")))
        }

        async fn check_availability(&self) -> Result<Availability, GatewayError> {
            self.availability
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(GatewayError::transport("no scripted availability")))
        }
    }

    fn hindi_response(original: &str, translated: &str) -> TranslateResponse {
        TranslateResponse {
            original_text: original.to_string(),
            translated_text: translated.to_string(),
            source_lang: "en".to_string(),
            target_lang: "hi".to_string(),
            provider: "deep-translator".to_string(),
            confidence: Some(0.95),
            is_mock: false,
        }
    }

    fn controller() -> (SessionController<Arc<ScriptedGateway>>, Arc<ScriptedGateway>) {
        let gateway = Arc::new(ScriptedGateway::default());
        (SessionController::new(Arc::clone(&gateway)), gateway)
    }

    async fn stage_upload(controller: &mut SessionController<Arc<ScriptedGateway>>) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sign.png");
        std::fs::write(&path, b"fake png bytes").unwrap();
        controller.prepare_upload(&path).await.unwrap();
    }

    // ----- text submission -----

    #[tokio::test]
    async fn test_successful_submission_updates_result_and_history() {
        let (mut ctl, gateway) = controller();
        gateway.push_text(Ok(hindi_response("Parking Available", "पार्किंग उपलब्ध है")));

        ctl.set_text_input("Parking Available");
        ctl.submit_text().await.unwrap();

        assert_eq!(ctl.text_state().phase(), Phase::Succeeded);
        let result = ctl.text_state().result().unwrap();
        assert_eq!(result.translated_text, "पार्किंग उपलब्ध है");
        assert!(!result.is_mock);
        assert_eq!(ctl.text_state().error(), None);

        assert_eq!(ctl.history().len(), 1);
        let entry = ctl.latest_entry().unwrap();
        assert_eq!(entry.original_text, "Parking Available");
        assert_eq!(entry.translated_text, "पार्किंग उपलब्ध है");
        assert_eq!(entry.source_lang, "en");
        assert_eq!(entry.target_lang, "hi");
        assert_eq!(entry.provider, "deep-translator");
        assert!(!entry.is_image);
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected_without_gateway_call() {
        let (mut ctl, gateway) = controller();

        ctl.set_text_input("   ");
        let err = ctl.submit_text().await.unwrap_err();

        assert_eq!(err, SubmitError::EmptyText);
        assert_eq!(gateway.text_calls(), 0);
        assert_eq!(ctl.text_state().phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_duplicate_submission_rejected_while_in_flight() {
        let (mut ctl, gateway) = controller();
        ctl.set_text_input("hello");

        // First submission parks the mode in Submitting
        let pending = ctl.begin_text_submission().unwrap();
        assert_eq!(ctl.text_state().phase(), Phase::Submitting);

        // Second submission must be rejected without any network activity
        assert_eq!(ctl.begin_text_submission().unwrap_err(), SubmitError::InFlight);
        assert_eq!(ctl.submit_text().await.unwrap_err(), SubmitError::InFlight);
        assert_eq!(gateway.text_calls(), 0);

        // Resolving the first unblocks resubmission
        ctl.apply_text_response(pending.token, Ok(hindi_response("hello", "नमस्ते")));
        assert_eq!(ctl.text_state().phase(), Phase::Succeeded);
        assert!(ctl.begin_text_submission().is_ok());
    }

    #[tokio::test]
    async fn test_failure_records_detail_and_preserves_history() {
        let (mut ctl, gateway) = controller();
        gateway.push_text(Ok(hindi_response("first", "पहला")));
        gateway.push_text(Err(GatewayError::provider("Unsupported language pair")));

        ctl.set_text_input("first");
        ctl.submit_text().await.unwrap();
        assert_eq!(ctl.history().len(), 1);

        ctl.set_text_input("second");
        ctl.submit_text().await.unwrap();

        assert_eq!(ctl.text_state().phase(), Phase::Failed);
        assert_eq!(ctl.text_state().error(), Some("Unsupported language pair"));
        // History untouched by the failure
        assert_eq!(ctl.history().len(), 1);
    }

    #[tokio::test]
    async fn test_failure_with_blank_detail_uses_generic_message() {
        let (mut ctl, gateway) = controller();
        gateway.push_text(Err(GatewayError::transport("")));

        ctl.set_text_input("hello");
        ctl.submit_text().await.unwrap();

        assert_eq!(ctl.text_state().error(), Some(TEXT_FAILURE_FALLBACK));
    }

    #[tokio::test]
    async fn test_success_clears_previous_error() {
        let (mut ctl, gateway) = controller();
        gateway.push_text(Err(GatewayError::provider("engine down")));
        gateway.push_text(Ok(hindi_response("hello", "नमस्ते")));

        ctl.set_text_input("hello");
        ctl.submit_text().await.unwrap();
        assert!(ctl.text_state().error().is_some());

        ctl.submit_text().await.unwrap();
        assert_eq!(ctl.text_state().phase(), Phase::Succeeded);
        assert_eq!(ctl.text_state().error(), None);
    }

    #[tokio::test]
    async fn test_history_bounded_at_capacity_with_fifo_eviction() {
        let (mut ctl, gateway) = controller();

        for n in 0..15 {
            gateway.push_text(Ok(hindi_response(&format!("text {}", n), &format!("t {}", n))));
            ctl.set_text_input(format!("text {}", n));
            ctl.submit_text().await.unwrap();
            assert_eq!(ctl.history().len(), (n + 1).min(10));
        }

        assert_eq!(ctl.history().len(), 10);
        assert_eq!(ctl.history().iter().next().unwrap().original_text, "text 5");
        assert_eq!(ctl.latest_entry().unwrap().original_text, "text 14");
    }

    #[tokio::test]
    async fn test_stale_text_response_discarded() {
        let (mut ctl, _gateway) = controller();
        ctl.set_text_input("first");
        let stale = ctl.begin_text_submission().unwrap();

        // Simulate the first request being abandoned and a second one issued
        ctl.apply_text_response(stale.token, Err(GatewayError::transport("timeout")));
        ctl.set_text_input("second");
        let fresh = ctl.begin_text_submission().unwrap();

        // The stale token must not overwrite the newer in-flight state
        ctl.apply_text_response(stale.token, Ok(hindi_response("first", "पहला")));
        assert_eq!(ctl.text_state().phase(), Phase::Submitting);
        assert_eq!(ctl.history().len(), 0);

        ctl.apply_text_response(fresh.token, Ok(hindi_response("second", "दूसरा")));
        assert_eq!(ctl.text_state().result().unwrap().original_text, "second");
        assert_eq!(ctl.history().len(), 1);
    }

    // ----- image submission -----

    #[tokio::test]
    async fn test_image_submission_without_upload_is_noop() {
        let (mut ctl, gateway) = controller();

        let err = ctl.submit_image().await.unwrap_err();
        assert_eq!(err, SubmitError::NoImage);
        assert_eq!(gateway.image_calls(), 0);
        assert_eq!(ctl.image_state().phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_image_submission_success_appends_image_entry() {
        let (mut ctl, gateway) = controller();
        gateway.push_image(Ok(ImageTranslateResponse {
            extracted_text: "Parking Available".to_string(),
            translated_text: "पार्किंग उपलब्ध है".to_string(),
            source_lang: "en".to_string(),
            target_lang: "hi".to_string(),
            provider: "deep-translator".to_string(),
            ocr_confidence: Some(0.93),
            is_mock: false,
        }));

        stage_upload(&mut ctl).await;
        ctl.submit_image().await.unwrap();

        assert_eq!(ctl.image_state().phase(), Phase::Succeeded);
        let result = ctl.image_state().result().unwrap();
        assert_eq!(result.original_text, "Parking Available");
        assert_eq!(result.ocr_confidence, Some(0.93));

        let entry = ctl.latest_entry().unwrap();
        assert!(entry.is_image);
        assert_eq!(entry.original_text, "Parking Available");
    }

    #[tokio::test]
    async fn test_image_modes_are_independent() {
        let (mut ctl, gateway) = controller();
        gateway.push_text(Ok(hindi_response("hello", "नमस्ते")));

        // Image mode stuck in Submitting must not block text mode
        stage_upload(&mut ctl).await;
        let _pending_image = ctl.begin_image_submission().unwrap();
        assert_eq!(ctl.image_state().phase(), Phase::Submitting);

        ctl.set_text_input("hello");
        ctl.submit_text().await.unwrap();
        assert_eq!(ctl.text_state().phase(), Phase::Succeeded);
        assert_eq!(ctl.image_state().phase(), Phase::Submitting);
    }

    #[tokio::test]
    async fn test_ocr_unavailable_error_flips_probe() {
        let (mut ctl, gateway) = controller();
        gateway.push_image(Err(GatewayError::ocr_unavailable(
            "OCR engine (Tesseract) is not available",
        )));

        stage_upload(&mut ctl).await;
        assert!(ctl.ocr_warning().is_none());

        ctl.submit_image().await.unwrap();
        assert_eq!(ctl.image_state().phase(), Phase::Failed);
        assert_eq!(ctl.ocr_probe(), OcrProbe::Unavailable);
        assert!(ctl.ocr_warning().is_some());
    }

    // ----- language handling -----

    #[test]
    fn test_swap_languages_is_involution() {
        let (mut ctl, _gateway) = controller();
        ctl.set_source_lang("en");
        ctl.set_target_lang("ta");

        ctl.swap_languages();
        assert_eq!(ctl.source_lang(), "ta");
        assert_eq!(ctl.target_lang(), "en");

        ctl.swap_languages();
        assert_eq!(ctl.source_lang(), "en");
        assert_eq!(ctl.target_lang(), "ta");
    }

    #[tokio::test]
    async fn test_swap_languages_valid_while_submitting() {
        let (mut ctl, _gateway) = controller();
        ctl.set_text_input("hello");
        let _pending = ctl.begin_text_submission().unwrap();

        ctl.swap_languages();
        assert_eq!(ctl.source_lang(), "hi");
        assert_eq!(ctl.target_lang(), "en");
        // Swapping never issues a request or changes the phase
        assert_eq!(ctl.text_state().phase(), Phase::Submitting);
    }

    // ----- history replay -----

    #[tokio::test]
    async fn test_load_from_history_rehydrates_fields() {
        let (mut ctl, gateway) = controller();
        gateway.push_text(Ok(TranslateResponse {
            original_text: "Parking Available".to_string(),
            translated_text: "பார்க்கிங் உள்ளது".to_string(),
            source_lang: "en".to_string(),
            target_lang: "ta".to_string(),
            provider: "deep-translator".to_string(),
            confidence: Some(0.95),
            is_mock: false,
        }));

        ctl.set_target_lang("ta");
        ctl.set_text_input("Parking Available");
        ctl.submit_text().await.unwrap();
        let id = ctl.latest_entry().unwrap().id;

        // Drift the pending fields, then replay
        ctl.set_source_lang("hi");
        ctl.set_target_lang("gu");
        ctl.set_text_input("something else");
        ctl.open_history();

        assert!(ctl.load_from_history(id));
        assert_eq!(ctl.source_lang(), "en");
        assert_eq!(ctl.target_lang(), "ta");
        assert_eq!(ctl.text_input(), "Parking Available");
        assert!(!ctl.history_open());
        // Replay does not re-trigger translation
        assert_eq!(gateway.text_calls(), 1);
    }

    #[test]
    fn test_load_from_unknown_history_id() {
        let (mut ctl, _gateway) = controller();
        assert!(!ctl.load_from_history(42));
    }

    // ----- availability probe -----

    #[tokio::test]
    async fn test_probe_failure_keeps_warning_hidden() {
        let (mut ctl, gateway) = controller();
        gateway.set_availability(Err(GatewayError::transport("connection refused")));

        ctl.probe_availability().await;

        assert_eq!(ctl.ocr_probe(), OcrProbe::Unknown);
        assert!(ctl.ocr_warning().is_none());
    }

    #[tokio::test]
    async fn test_probe_reports_unavailable_shows_warning() {
        let (mut ctl, gateway) = controller();
        gateway.set_availability(Ok(Availability {
            ocr_available: false,
            engine: None,
            guidance: Some("install tesseract-ocr".to_string()),
        }));

        ctl.probe_availability().await;

        assert_eq!(ctl.ocr_probe(), OcrProbe::Unavailable);
        assert_eq!(ctl.ocr_warning(), Some("install tesseract-ocr"));
    }

    #[tokio::test]
    async fn test_probe_reports_available() {
        let (mut ctl, gateway) = controller();
        gateway.set_availability(Ok(Availability {
            ocr_available: true,
            engine: Some("tesseract".to_string()),
            guidance: None,
        }));

        ctl.probe_availability().await;

        assert_eq!(ctl.ocr_probe(), OcrProbe::Available);
        assert!(ctl.ocr_warning().is_none());
    }

    #[tokio::test]
    async fn test_probe_unavailable_without_guidance_uses_default_hint() {
        let (mut ctl, gateway) = controller();
        gateway.set_availability(Ok(Availability {
            ocr_available: false,
            engine: None,
            guidance: None,
        }));

        ctl.probe_availability().await;
        assert_eq!(ctl.ocr_warning(), Some(anuvad::ocr::OCR_INSTALL_HINT));
    }

    // ----- submission guards -----

    #[test]
    fn test_can_submit_reflects_guards() {
        let (mut ctl, _gateway) = controller();

        assert!(!ctl.can_submit_text());
        ctl.set_text_input("hello");
        assert!(ctl.can_submit_text());

        assert!(!ctl.can_submit_image());
    }
}
