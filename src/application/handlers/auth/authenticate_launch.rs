//! AuthenticateLaunchHandler - verifies launch data and binds a user.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::catalog::User;
use crate::domain::foundation::TelegramId;
use crate::domain::launch::{LaunchAuthenticator, LaunchData, LaunchError};
use crate::ports::UserRepository;

/// Command carrying the opaque launch payload.
#[derive(Debug, Clone)]
pub struct AuthenticateLaunchCommand {
    pub init_data: String,
}

/// Result of a successful launch authentication.
#[derive(Debug, Clone)]
pub struct AuthenticatedLaunch {
    pub user: User,
    pub launch: LaunchData,
}

/// Errors from launch authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The payload did not verify; maps to a 400 rejection.
    #[error("Launch data rejected: {0}")]
    Rejected(#[from] LaunchError),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

/// Handler establishing the session identity from a launch payload.
///
/// On a verified payload the Telegram user is looked up by their platform
/// id, created on first contact, and returned for session binding.
pub struct AuthenticateLaunchHandler {
    authenticator: LaunchAuthenticator,
    users: Arc<dyn UserRepository>,
}

impl AuthenticateLaunchHandler {
    pub fn new(authenticator: LaunchAuthenticator, users: Arc<dyn UserRepository>) -> Self {
        Self {
            authenticator,
            users,
        }
    }

    pub async fn handle(
        &self,
        command: AuthenticateLaunchCommand,
    ) -> Result<AuthenticatedLaunch, AuthError> {
        let launch = self.authenticator.authenticate(&command.init_data)?;

        let telegram_id = TelegramId::new(launch.user.id.to_string())
            .map_err(|e| AuthError::Infrastructure(e.to_string()))?;
        let user = self
            .users
            .get_or_create(&telegram_id)
            .await
            .map_err(|e| AuthError::Infrastructure(e.to_string()))?;

        tracing::info!(telegram_id = %user.telegram_id, "launch data verified");
        Ok(AuthenticatedLaunch { user, launch })
    }
}
