use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use restyle_accounts::{AccountsError, ErrorResponse};
use restyle_core::HttpError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RegenError>;

/// Image regeneration errors with appropriate HTTP status codes
#[derive(Debug, Error)]
pub enum RegenError {
    /// Invalid request parameters
    #[error("{0}")]
    InvalidRequest(String),

    /// Network or connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Provider answered with a non-success status
    #[error("Provider API error ({status}): {message}")]
    UpstreamStatus { status: u16, message: String },

    /// Provider body was not valid JSON
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// Provider described the image in prose instead of returning one
    #[error("Model returned text instead of image. The model may not support image generation.")]
    TextInsteadOfImage,

    /// Provider body matched none of the known image shapes
    #[error("No image was generated - unexpected response format")]
    UnexpectedFormat,

    /// One variant of a batch failed, failing the batch
    #[error("Failed to generate image {} of batch for prompt \"{prompt}\": {source}", .index + 1)]
    VariantFailed {
        /// Position of the failed prompt in template order
        index: usize,
        prompt: String,
        source: Box<RegenError>,
    },

    /// Credit or photo store failure
    #[error(transparent)]
    Accounts(#[from] AccountsError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Batch task did not run to completion
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RegenError {
    /// Innermost cause, looking through `VariantFailed`
    pub fn root(&self) -> &Self {
        match self {
            Self::VariantFailed { source, .. } => source.root(),
            other => other,
        }
    }
}

impl HttpError for RegenError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Connection(_)
            | Self::UpstreamStatus { .. }
            | Self::MalformedResponse(_)
            | Self::TextInsteadOfImage
            | Self::UnexpectedFormat
            | Self::VariantFailed { .. } => StatusCode::BAD_GATEWAY,
            Self::Accounts(inner) => inner.status_code(),
            Self::Config(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidRequest(_) => "invalid_request_error",
            Self::Connection(_)
            | Self::UpstreamStatus { .. }
            | Self::MalformedResponse(_)
            | Self::TextInsteadOfImage
            | Self::UnexpectedFormat
            | Self::VariantFailed { .. } => "api_error",
            Self::Accounts(inner) => inner.error_type(),
            Self::Config(_) | Self::Internal(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Accounts(inner) => inner.client_message(),
            Self::Config(_) | Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for RegenError {
    fn into_response(self) -> Response {
        ErrorResponse::from_error(&self).into_response()
    }
}
