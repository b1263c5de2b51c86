//! Axum router configuration for payment endpoints.

use axum::{routing::post, Router};

use super::handlers::{create_link, handle_webhook};
use crate::adapters::http::AppState;

/// Create the payments router.
///
/// # Routes
/// - `POST /link` - Create a signed payment link (requires session identity)
/// - `POST /webhook` - Provider notification (signature verified, no session)
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/link", post(create_link))
        .route("/webhook", post(handle_webhook))
}
