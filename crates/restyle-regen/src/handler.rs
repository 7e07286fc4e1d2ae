use axum::{Json, body::Bytes, extract::State};
use restyle_accounts::{AccountsError, NewPhoto};
use restyle_core::RequestContext;

use crate::{
    GenerateState,
    error::{RegenError, Result},
    prompts::Style,
    types::{GenerateRequest, GenerateResponse, ImageReference, SourceImage},
};

/// Handle `POST /api/generate`
///
/// The body is only read once the caller is known to be signed in and to
/// hold enough credits. The batch cost is reserved before any upstream call
/// and refunded if the batch cannot be completed and stored.
pub(crate) async fn generate(
    State(state): State<GenerateState>,
    axum::Extension(context): axum::Extension<RequestContext>,
    body: Bytes,
) -> Result<Json<GenerateResponse>> {
    let user_id = context.user_id().ok_or(AccountsError::Unauthorized)?;

    let required = state.accounts.credits_per_batch;
    let balance = state.accounts.ledger.balance(user_id).await?;
    if balance < required {
        tracing::info!(user_id, balance, required, "generation refused for insufficient credits");
        return Err(AccountsError::InsufficientCredits { balance, required }.into());
    }

    let request: GenerateRequest = serde_json::from_slice(&body)
        .map_err(|e| RegenError::InvalidRequest(format!("Invalid request body: {e}")))?;

    let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());
    let (Some(image_data), Some(mime_type)) = (non_empty(request.image_data), non_empty(request.mime_type)) else {
        return Err(RegenError::InvalidRequest("Missing imageData or mimeType".to_string()));
    };

    let image = SourceImage::from_upload(&image_data, &mime_type);
    let style = Style::resolve(request.physique.as_deref(), state.regenerator.default_style());

    // A concurrent request that already spent the credit loses here, before
    // any upstream call is made
    let remaining_credits = state.accounts.ledger.debit(user_id, required).await?;

    tracing::info!(
        user_id,
        mime_type = %image.mime_type(),
        image_len = image.data().len(),
        style = %style,
        "profile picture generation requested"
    );

    // Settled in its own task so a client disconnect cannot skip the refund
    let batch = tokio::spawn(settle_batch(
        state.clone(),
        user_id.to_owned(),
        image,
        style,
        image_data,
    ));
    let images = batch.await.map_err(|e| RegenError::Internal(e.to_string()))??;

    tracing::info!(user_id, remaining_credits, "profile pictures generated");

    Ok(Json(GenerateResponse {
        success: true,
        images,
        remaining_credits,
    }))
}

/// Run the batch, refunding the reserved credits if it fails
async fn settle_batch(
    state: GenerateState,
    user_id: String,
    image: SourceImage,
    style: Style,
    original_url: String,
) -> Result<Vec<ImageReference>> {
    let result = run_batch(&state, &user_id, &image, &style, original_url).await;

    if let Err(err) = &result {
        tracing::warn!(user_id = %user_id, cause = %err.root(), "batch failed, refunding credits");

        if let Err(refund_err) = state.accounts.ledger.refund(&user_id, state.accounts.credits_per_batch).await {
            tracing::error!(user_id = %user_id, error = %refund_err, "failed to refund credits");
        }
    }

    result
}

async fn run_batch(
    state: &GenerateState,
    user_id: &str,
    image: &SourceImage,
    style: &Style,
    original_url: String,
) -> Result<Vec<ImageReference>> {
    let images = state.regenerator.generate_variants(image, style).await?;

    state
        .accounts
        .photos
        .save(NewPhoto {
            user_id: user_id.to_owned(),
            original_url,
            generated_urls: images.iter().map(|image| image.as_str().to_owned()).collect(),
        })
        .await?;

    Ok(images)
}
