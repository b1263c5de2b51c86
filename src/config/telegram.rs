//! Telegram platform configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Telegram configuration (bot token for launch-data verification, web app
/// base URL for callback links)
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot token used to derive the launch-data signing key. Empty means
    /// launch authentication always rejects.
    #[serde(default)]
    pub bot_token: String,

    /// Public base URL of the Mini App, used to build the provider's
    /// return/success/notification callbacks.
    #[serde(default = "default_webapp_url")]
    pub webapp_url: String,
}

fn default_webapp_url() -> String {
    "http://127.0.0.1:8080/".to_string()
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            webapp_url: default_webapp_url(),
        }
    }
}

impl TelegramConfig {
    /// The web app base URL without a trailing slash.
    pub fn webapp_base(&self) -> &str {
        self.webapp_url.trim_end_matches('/')
    }

    /// Validate Telegram configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.webapp_url.starts_with("http://") && !self.webapp_url.starts_with("https://") {
            return Err(ValidationError::InvalidWebAppUrl);
        }
        Ok(())
    }
}
