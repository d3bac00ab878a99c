use std::sync::Arc;

use tracing::{info, warn};

use anuvad::ocr::{OcrEngine, TesseractEngine};
use anuvad::provider::ProviderRegistry;

mod api;

use api::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("info".parse().unwrap()),
        )
        .init();

    let registry = ProviderRegistry::from_env()?;
    if registry.google_available() {
        info!("Google Translate API provider configured");
    }

    let ocr = match TesseractEngine::detect().await {
        Some(engine) => Some(Arc::new(engine) as Arc<dyn OcrEngine>),
        None => {
            warn!("tesseract binary not found; image translation disabled");
            None
        }
    };

    let state = AppState { registry: Arc::new(registry), ocr };
    let app = api::router(state);

    let host = std::env::var("ANUVAD_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("ANUVAD_PORT").unwrap_or_else(|_| "8000".to_string());
    let addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("anuvad web server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
