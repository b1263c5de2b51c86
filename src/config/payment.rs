//! Payment provider configuration (Payform-style hosted payment page)

use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration.
///
/// The shared secret and base URL are process-wide, read-only values loaded
/// once at startup and passed explicitly into the components that need
/// them; nothing reads them ambiently.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Base URL of the hosted payment page
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Shared HMAC secret. Absent or empty means the explicit degraded
    /// mode: links go out unsigned and webhooks are not verified (logged,
    /// never silently treated as verified).
    #[serde(default)]
    pub secret: Option<String>,

    /// Optional `sys` field attached to outbound payloads for custom
    /// integrations.
    #[serde(default)]
    pub sys: Option<String>,

    /// Whether the callback/return URLs participate in the signed field
    /// set. Provider documentation revisions disagree; resolved here
    /// against the current docs rather than guessed in code.
    #[serde(default)]
    pub sign_callback_urls: bool,
}

fn default_base_url() -> String {
    "https://demo.payform.ru/".to_string()
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            secret: None,
            sys: None,
            sign_callback_urls: false,
        }
    }
}

impl PaymentConfig {
    /// Secret as an optional slice, treating empty as unset.
    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref().filter(|s| !s.is_empty())
    }

    /// Whether signing/verification is active.
    pub fn is_signing_enabled(&self) -> bool {
        self.secret().is_some()
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT_BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidPaymentBaseUrl);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid_and_unsigned() {
        let config = PaymentConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.is_signing_enabled());
    }

    #[test]
    fn empty_secret_counts_as_unset() {
        let config = PaymentConfig {
            secret: Some(String::new()),
            ..Default::default()
        };
        assert!(config.secret().is_none());
        assert!(!config.is_signing_enabled());
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let config = PaymentConfig {
            base_url: "ftp://pay.example.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
