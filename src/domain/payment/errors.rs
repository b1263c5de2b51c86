//! Webhook error types for provider notification handling.
//!
//! Only genuine verification failures are errors; unrecognized orders and
//! statuses are acknowledged no-ops handled by the decision logic in
//! [`super::webhook`], precisely so that a cooperative but noisy provider
//! never enters a retry storm.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that occur during webhook processing.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// A secret is configured but the notification carried no `Sign` header.
    #[error("Signature header missing")]
    SignatureMissing,

    /// The recomputed digest differs from the supplied one.
    #[error("Signature mismatch")]
    SignatureMismatch,

    /// The request body was not parsable as form-encoded pairs.
    #[error("Invalid form body")]
    InvalidForm,

    /// Persistence failed while applying the settlement.
    #[error("Database error: {0}")]
    Database(String),
}

impl WebhookError {
    /// Machine-readable reason code surfaced in the HTTP response body.
    pub fn reason_code(&self) -> &'static str {
        match self {
            WebhookError::SignatureMissing => "signature_missing",
            WebhookError::SignatureMismatch => "signature_incorrect",
            WebhookError::InvalidForm => "invalid_form",
            WebhookError::Database(_) => "internal_error",
        }
    }

    /// Maps the error to an HTTP status code.
    ///
    /// Verification and parse failures answer 400 so the provider knows the
    /// delivery was rejected; persistence failures answer 500 so it retries.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::SignatureMissing
            | WebhookError::SignatureMismatch
            | WebhookError::InvalidForm => StatusCode::BAD_REQUEST,
            WebhookError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
