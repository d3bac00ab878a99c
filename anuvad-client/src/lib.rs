//! Client-side orchestration for the anuvad translation service
//!
//! This crate holds everything a front end needs between user input and the
//! REST service: the [`gateway`] contract and its HTTP implementation, the
//! [`upload`] preparer for image payloads and previews, the bounded
//! [`history`] store, and the [`session`] controller that ties them together
//! into a per-mode submission state machine.
//!
//! # Example
//!
//! ```ignore
//! use anuvad_client::{HttpGateway, SessionController};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = HttpGateway::new("http://127.0.0.1:8000")?;
//!     let mut session = SessionController::new(gateway);
//!
//!     session.probe_availability().await;
//!     session.set_text_input("Parking Available");
//!     session.submit_text().await?;
//!
//!     if let Some(result) = session.text_state().result() {
//!         println!("{}", result.translated_text);
//!     }
//!     Ok(())
//! }
//! ```

pub mod gateway;
pub mod history;
pub mod session;
pub mod upload;

pub use gateway::{
    Availability, GatewayError, GatewayErrorKind, HttpGateway, ImageParams, TranslationGateway,
};
pub use history::{HISTORY_CAPACITY, HistoryEntry, HistoryStore};
pub use session::{
    ModeState, OcrProbe, Phase, SessionController, SubmitError, TranslationOutcome,
};
pub use upload::{PreparedUpload, UploadError, UploadPreparer};
