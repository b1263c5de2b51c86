//! HTTP DTOs for launch authentication.

use serde::{Deserialize, Serialize};

use crate::application::handlers::auth::AuthenticatedLaunch;

/// Request carrying the opaque launch payload from the Mini App shell.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticateRequest {
    /// The raw `initData` string, exactly as handed over by the platform.
    pub init_data: String,
}

/// Response for a verified launch.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticateResponse {
    pub telegram_id: String,
    pub has_subscription: bool,
    pub free_podcast_id: Option<i64>,
    pub first_name: Option<String>,
    pub username: Option<String>,
}

impl From<AuthenticatedLaunch> for AuthenticateResponse {
    fn from(result: AuthenticatedLaunch) -> Self {
        Self {
            telegram_id: result.user.telegram_id.to_string(),
            has_subscription: result.user.has_subscription,
            free_podcast_id: result.user.free_podcast_id.map(|p| p.as_i64()),
            first_name: result.launch.user.first_name,
            username: result.launch.user.username,
        }
    }
}
