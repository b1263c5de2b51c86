//! Axum router configuration for authentication endpoints.

use axum::{routing::post, Router};

use super::handlers::authenticate;
use crate::adapters::http::AppState;

/// Create the authentication router.
///
/// # Routes
/// - `POST /telegram` - Verify launch data and bind the session user
pub fn routes() -> Router<AppState> {
    Router::new().route("/telegram", post(authenticate))
}
