//! HTTP handlers for podcast endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::{AppState, AuthenticatedTelegramUser, ErrorResponse};
use crate::application::handlers::access::{AccessError, CheckAccessQuery};
use crate::domain::foundation::PodcastId;

use super::dto::AccessResponse;

/// GET /api/podcasts/:id/access - Resolve full access for the caller.
pub async fn check_access(
    State(state): State<AppState>,
    user: AuthenticatedTelegramUser,
    Path(podcast_id): Path<i64>,
) -> Result<impl IntoResponse, AccessApiError> {
    let handler = state.check_access_handler();
    let verdict = handler
        .handle(CheckAccessQuery {
            telegram_id: user.telegram_id,
            podcast_id: PodcastId::new(podcast_id),
        })
        .await?;

    Ok(Json(AccessResponse::from(verdict)))
}

/// API error type for access checks.
pub struct AccessApiError(AccessError);

impl From<AccessError> for AccessApiError {
    fn from(err: AccessError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AccessApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, code) = match &self.0 {
            AccessError::PodcastNotFound => (StatusCode::NOT_FOUND, "PODCAST_NOT_FOUND"),
            AccessError::Infrastructure(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };
        let body = ErrorResponse::new(code, self.0.to_string());
        (status, Json(body)).into_response()
    }
}
