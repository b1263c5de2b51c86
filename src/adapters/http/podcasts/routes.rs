//! Axum router configuration for podcast endpoints.

use axum::{routing::get, Router};

use super::handlers::check_access;
use crate::adapters::http::AppState;

/// Create the podcasts router.
///
/// # Routes
/// - `GET /:id/access` - Resolve full access for the calling user
pub fn routes() -> Router<AppState> {
    Router::new().route("/:id/access", get(check_access))
}
