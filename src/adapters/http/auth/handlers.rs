//! HTTP handlers for launch authentication.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::{AppState, ErrorResponse};
use crate::application::handlers::auth::{AuthError, AuthenticateLaunchCommand};

use super::dto::{AuthenticateRequest, AuthenticateResponse};

/// POST /api/auth/telegram - Verify launch data and bind the session user.
pub async fn authenticate(
    State(state): State<AppState>,
    Json(request): Json<AuthenticateRequest>,
) -> Result<impl IntoResponse, AuthApiError> {
    let handler = state.authenticate_launch_handler();
    let result = handler
        .handle(AuthenticateLaunchCommand {
            init_data: request.init_data,
        })
        .await?;

    Ok(Json(AuthenticateResponse::from(result)))
}

/// API error type that converts authentication errors to HTTP responses.
pub struct AuthApiError(AuthError);

impl From<AuthError> for AuthApiError {
    fn from(err: AuthError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, code) = match &self.0 {
            AuthError::Rejected(_) => (StatusCode::BAD_REQUEST, "LAUNCH_DATA_REJECTED"),
            AuthError::Infrastructure(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };
        let body = ErrorResponse::new(code, self.0.to_string());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::launch::LaunchError;

    #[test]
    fn rejected_launch_maps_to_400() {
        let err = AuthApiError(AuthError::Rejected(LaunchError::HashMismatch));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn infrastructure_failure_maps_to_500() {
        let err = AuthApiError(AuthError::Infrastructure("db down".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
