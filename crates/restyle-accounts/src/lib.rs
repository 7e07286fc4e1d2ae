//! Credit balances and generated-photo history
//!
//! The in-memory ledger and photo store are development stand-ins: the
//! photo store holds every upload in full for the life of the process.
//! Real persistence implements `CreditLedger` and `PhotoStore` and is
//! handed to the server as an `Accounts` bundle.

#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]

mod error;
mod ledger;
mod photos;

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use restyle_config::AccountsConfig;
use restyle_core::RequestContext;
use serde::Serialize;

pub use error::{AccountsError, ErrorResponse, Result};
pub use ledger::{CreditLedger, MemoryLedger};
pub use photos::{MemoryPhotoStore, NewPhoto, PhotoRecord, PhotoStore};

/// Shared handles to the credit ledger and photo store
#[derive(Clone)]
pub struct Accounts {
    pub ledger: Arc<dyn CreditLedger>,
    pub photos: Arc<dyn PhotoStore>,
    /// Credits consumed by one successful batch
    pub credits_per_batch: u32,
}

impl Accounts {
    /// In-process ledger and store configured from `[accounts]`
    pub fn in_memory(config: &AccountsConfig) -> Self {
        tracing::debug!(
            initial_credits = config.initial_credits,
            credits_per_batch = config.credits_per_batch,
            "using in-memory credit ledger and photo store"
        );

        Self {
            ledger: Arc::new(MemoryLedger::new(config.initial_credits)),
            photos: Arc::new(MemoryPhotoStore::new()),
            credits_per_batch: config.credits_per_batch,
        }
    }
}

impl std::fmt::Debug for Accounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Accounts")
            .field("credits_per_batch", &self.credits_per_batch)
            .finish_non_exhaustive()
    }
}

/// Create the endpoint router for credit and history lookups
pub fn endpoint_router() -> Router<Accounts> {
    Router::new()
        .route("/api/credits", get(credits))
        .route("/api/photos", get(photos))
}

#[derive(Debug, Serialize)]
struct CreditsResponse {
    success: bool,
    credits: u32,
}

#[derive(Debug, Serialize)]
struct PhotosResponse {
    success: bool,
    photos: Vec<PhotoRecord>,
}

async fn credits(
    State(accounts): State<Accounts>,
    axum::Extension(context): axum::Extension<RequestContext>,
) -> Result<Json<CreditsResponse>> {
    let user_id = context.user_id().ok_or(AccountsError::Unauthorized)?;
    let credits = accounts.ledger.balance(user_id).await?;

    Ok(Json(CreditsResponse { success: true, credits }))
}

async fn photos(
    State(accounts): State<Accounts>,
    axum::Extension(context): axum::Extension<RequestContext>,
) -> Result<Json<PhotosResponse>> {
    let user_id = context.user_id().ok_or(AccountsError::Unauthorized)?;
    let photos = accounts.photos.list(user_id).await?;

    Ok(Json(PhotosResponse { success: true, photos }))
}
