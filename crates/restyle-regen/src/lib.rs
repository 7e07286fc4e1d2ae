#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod error;
mod handler;
mod normalize;
pub mod prompts;
mod protocol;
mod provider;
mod regenerator;
mod types;

use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit, routing::post};
use restyle_accounts::Accounts;
use restyle_config::RegeneratorConfig;

pub use error::{RegenError, Result};
pub use normalize::normalize_response;
pub use prompts::{PROMPT_TEMPLATES, STYLE_PLACEHOLDER, Style, VARIANT_COUNT, render_prompts};
pub use protocol::ChatResponse;
pub use provider::VariantProvider;
pub use regenerator::Regenerator;
pub use types::{GenerateRequest, GenerateResponse, ImageReference, SourceImage};

/// Upload size accepted by the generate endpoint
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Build the regenerator against the configured chat-completions provider
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed
pub fn build_regenerator(config: &RegeneratorConfig) -> anyhow::Result<Arc<Regenerator>> {
    let provider = provider::chat::ChatImageProvider::new(config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize image regenerator: {e}"))?;

    tracing::debug!(
        provider = provider.name(),
        model = %config.model,
        "image regenerator initialized"
    );

    Ok(Arc::new(Regenerator::new(Arc::new(provider), config.default_style.clone())))
}

/// State shared by the generate endpoint
#[derive(Clone, Debug)]
pub struct GenerateState {
    regenerator: Arc<Regenerator>,
    accounts: Accounts,
}

impl GenerateState {
    pub fn new(regenerator: Arc<Regenerator>, accounts: Accounts) -> Self {
        Self { regenerator, accounts }
    }
}

/// Create the endpoint router for batch generation
pub fn endpoint_router() -> Router<GenerateState> {
    Router::new()
        .route("/api/generate", post(handler::generate))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}
