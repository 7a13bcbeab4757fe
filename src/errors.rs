use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::models::ErrorBody;

/// Top-level application error.
/// Every variant renders as `{ "error": <message> }` with the status from [`AppError::status`].
#[derive(Debug, Error)]
pub enum AppError {
    // ── Upstream quota signals ───────────────────────────────────────────────
    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Payment required")]
    PaymentRequired,

    // ── Upstream failures ────────────────────────────────────────────────────
    #[error("AI gateway API key is not configured")]
    MissingApiKey,

    #[error("AI gateway error (status {status})")]
    GatewayStatus { status: u16 },

    #[error("AI gateway request failed: {0}")]
    GatewayTransport(#[source] reqwest::Error),

    #[error("Failed to generate quiz: no tool call in gateway response")]
    MissingToolCall,

    #[error("Failed to parse quiz arguments: {0}")]
    InvalidToolArguments(#[source] serde_json::Error),

    #[error("Failed to parse quiz arguments: expected a JSON object")]
    ToolArgumentsNotObject,

    #[error("Invalid quiz request: {message}")]
    InvalidQuizRequest { message: String },

    // ── Validation errors ────────────────────────────────────────────────────
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Field '{field_name}' cannot be empty")]
    EmptyField { field_name: String },

    #[error("The last message must be a user turn")]
    LastMessageNotFromUser,

    #[error("Expected {expected} answers but got {actual}")]
    AnswerCountMismatch { expected: usize, actual: usize },
}

impl AppError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        AppError::InvalidRequest { message: message.into() }
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::InvalidRequest { .. }
                | AppError::EmptyField { .. }
                | AppError::LastMessageNotFromUser
                | AppError::AnswerCountMismatch { .. }
        )
    }

    /// 429 and 402 are the only upstream statuses relayed as-is.
    pub fn is_quota(&self) -> bool {
        matches!(self, AppError::RateLimited | AppError::PaymentRequired)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::PaymentRequired => StatusCode::PAYMENT_REQUIRED,
            e if e.is_validation() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: self.to_string() };
        (self.status(), Json(body)).into_response()
    }
}
