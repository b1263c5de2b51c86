//! HTTP handlers for payment endpoints.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::{AppState, AuthenticatedTelegramUser, ErrorResponse};
use crate::application::handlers::payments::{
    CreatePaymentLinkCommand, PaymentLinkError, WebhookCommand,
};
use crate::domain::foundation::PodcastId;
use crate::domain::payment::{CanonicalPair, WebhookError, SIGN_HEADER};

use super::dto::{CreateLinkRequest, CreateLinkResponse, WebhookAck};

/// POST /api/payments/link - Create a signed payment link.
pub async fn create_link(
    State(state): State<AppState>,
    user: AuthenticatedTelegramUser,
    Json(request): Json<CreateLinkRequest>,
) -> Result<impl IntoResponse, PaymentApiError> {
    let handler = state.create_payment_link_handler();
    let result = handler
        .handle(CreatePaymentLinkCommand {
            telegram_id: user.telegram_id,
            tariff: request.tariff.into(),
            podcast_id: request.podcast_id.map(PodcastId::new),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CreateLinkResponse::from(result))))
}

/// POST /api/payments/webhook - Apply a provider notification.
///
/// No session auth; the delivery is authenticated by its `Sign` header.
/// The raw body is form-decoded exactly once and the decoded pairs are
/// what the signature is checked against.
pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
    body: axum::body::Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    let sign_header = headers
        .get(SIGN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let pairs: Vec<CanonicalPair> = url::form_urlencoded::parse(&body)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let handler = state.webhook_handler();
    handler.handle(WebhookCommand { pairs, sign_header }).await?;

    // Every evaluated outcome, including no-ops, acknowledges the delivery.
    Ok(Json(WebhookAck { ok: true }))
}

/// API error type for link creation.
pub struct PaymentApiError(PaymentLinkError);

impl From<PaymentLinkError> for PaymentApiError {
    fn from(err: PaymentLinkError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PaymentApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, code) = match &self.0 {
            PaymentLinkError::UserNotFound => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
            PaymentLinkError::PodcastNotFound => (StatusCode::NOT_FOUND, "PODCAST_NOT_FOUND"),
            PaymentLinkError::MissingPodcastId => (StatusCode::BAD_REQUEST, "MISSING_PODCAST_ID"),
            PaymentLinkError::AlreadyEntitled => (StatusCode::CONFLICT, "ALREADY_ENTITLED"),
            PaymentLinkError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };
        let body = ErrorResponse::new(code, self.0.to_string());
        (status, Json(body)).into_response()
    }
}

/// API error type for webhook deliveries.
///
/// The body carries the machine-readable reason code the provider logs.
pub struct WebhookApiError(WebhookError);

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.0.status_code();
        let body = ErrorResponse::new(self.0.reason_code(), self.0.to_string());
        (status, Json(body)).into_response()
    }
}
