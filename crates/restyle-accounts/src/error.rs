use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use restyle_core::HttpError;
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AccountsError>;

/// Credit ledger and photo store errors
#[derive(Debug, Error)]
pub enum AccountsError {
    /// No signed-in user on the request
    #[error("Authentication required")]
    Unauthorized,

    /// Balance does not cover the requested debit
    #[error("Insufficient credits. Please sign in again to get more credits.")]
    InsufficientCredits { balance: u32, required: u32 },

    /// Storage backend failure
    /// If Some(message), it can be shown to the caller
    /// If None, details stay in the logs
    #[error("Internal server error")]
    Internal(Option<String>),
}

impl HttpError for AccountsError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::InsufficientCredits { .. } => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::Unauthorized => "authentication_error",
            Self::InsufficientCredits { .. } => "insufficient_credits",
            Self::Internal(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Internal(Some(message)) => message.clone(),
            _ => self.to_string(),
        }
    }
}

/// JSON error body shared by every endpoint
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    error: ErrorDetails,
}

#[derive(Debug, Serialize)]
struct ErrorDetails {
    message: String,
    r#type: String,
    code: u16,
}

impl ErrorResponse {
    /// Build the body for any `HttpError`
    pub fn from_error(error: &impl HttpError) -> (StatusCode, Json<Self>) {
        let status = error.status_code();

        let body = Self {
            error: ErrorDetails {
                message: error.client_message(),
                r#type: error.error_type().to_string(),
                code: status.as_u16(),
            },
        };

        (status, Json(body))
    }
}

impl IntoResponse for AccountsError {
    fn into_response(self) -> Response {
        ErrorResponse::from_error(&self).into_response()
    }
}
