//! HTTP adapters: Axum routes, handlers and DTOs.

pub mod auth;
pub mod payments;
pub mod podcasts;

use std::sync::Arc;

use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Router;
use serde::Serialize;

use crate::application::handlers::access::CheckAccessHandler;
use crate::application::handlers::auth::AuthenticateLaunchHandler;
use crate::application::handlers::payments::{CreatePaymentLinkHandler, HandleWebhookHandler};
use crate::config::{PaymentConfig, TelegramConfig};
use crate::domain::foundation::TelegramId;
use crate::domain::launch::LaunchAuthenticator;
use crate::ports::{PodcastReader, PricingReader, TransactionRepository, UserRepository};

/// Shared application state containing all dependencies.
///
/// Cloned per request; every dependency is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub podcasts: Arc<dyn PodcastReader>,
    pub transactions: Arc<dyn TransactionRepository>,
    pub pricing: Arc<dyn PricingReader>,
    pub payment: PaymentConfig,
    pub telegram: TelegramConfig,
}

impl AppState {
    /// Create handlers on demand from the shared state.
    pub fn authenticate_launch_handler(&self) -> AuthenticateLaunchHandler {
        AuthenticateLaunchHandler::new(
            LaunchAuthenticator::new(self.telegram.bot_token.clone()),
            self.users.clone(),
        )
    }

    pub fn create_payment_link_handler(&self) -> CreatePaymentLinkHandler {
        CreatePaymentLinkHandler::new(
            self.users.clone(),
            self.podcasts.clone(),
            self.transactions.clone(),
            self.pricing.clone(),
            self.payment.clone(),
            self.telegram.clone(),
        )
    }

    pub fn webhook_handler(&self) -> HandleWebhookHandler {
        HandleWebhookHandler::new(
            self.transactions.clone(),
            self.users.clone(),
            self.payment.clone(),
        )
    }

    pub fn check_access_handler(&self) -> CheckAccessHandler {
        CheckAccessHandler::new(
            self.users.clone(),
            self.podcasts.clone(),
            self.transactions.clone(),
        )
    }
}

/// Standard JSON error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

/// Caller identity extracted from the request.
///
/// Session binding happens at launch authentication; subsequent requests
/// carry the platform id in the `X-Telegram-Id` header set by the Mini App
/// shell after a successful `/api/auth/telegram` round trip.
#[derive(Debug, Clone)]
pub struct AuthenticatedTelegramUser {
    pub telegram_id: TelegramId,
}

/// Rejection type for AuthenticatedTelegramUser extraction.
pub struct AuthenticationRequired;

impl IntoResponse for AuthenticationRequired {
    fn into_response(self) -> axum::response::Response {
        let error = ErrorResponse::new("AUTHENTICATION_REQUIRED", "Authentication is required");
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

impl<S> axum::extract::FromRequestParts<S> for AuthenticatedTelegramUser
where
    S: Send + Sync,
{
    type Rejection = AuthenticationRequired;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let telegram_id = parts
                .headers
                .get("X-Telegram-Id")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| TelegramId::new(s).ok())
                .ok_or(AuthenticationRequired)?;

            Ok(AuthenticatedTelegramUser { telegram_id })
        })
    }
}

/// The complete API router, suitable for mounting at `/api`.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::routes())
        .nest("/payments", payments::routes())
        .nest("/podcasts", podcasts::routes())
}
