//! Telegram WebApp init-data authentication.
//!
//! Verifies the signed launch payload the host platform hands to the Mini
//! App at session start. The platform mandates a two-stage key derivation:
//!
//! ```text
//! secret_key = HMAC-SHA256(key = "WebAppData", message = bot_token)
//! expected   = HMAC-SHA256(key = secret_key,  message = data_check_string)
//! ```
//!
//! where the data-check string is every pair except `hash`, sorted by key
//! and joined as `key=value` with newlines. Collapsing this to a single
//! HMAC pass silently rejects every real payload.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;
use url::form_urlencoded;

use super::identity::{LaunchData, TelegramUser};

/// Fixed key for the first derivation stage, set by the platform.
const KEY_DERIVATION_CONSTANT: &[u8] = b"WebAppData";

/// Why a launch payload was rejected.
///
/// None of these ever escapes as a panic; the HTTP boundary maps every
/// variant to a 400 rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchError {
    #[error("Empty launch payload")]
    EmptyPayload,

    #[error("No bot token configured")]
    NotConfigured,

    #[error("Launch payload carries no hash field")]
    MissingHash,

    #[error("Launch payload hash does not verify")]
    HashMismatch,

    #[error("Launch payload carries no user field")]
    MissingUser,

    #[error("Launch payload user field is not valid JSON")]
    MalformedUser,
}

/// Verifier for host-issued launch payloads.
#[derive(Debug, Clone)]
pub struct LaunchAuthenticator {
    bot_token: String,
}

impl LaunchAuthenticator {
    /// Creates an authenticator for the given bot token.
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
        }
    }

    /// Verifies an opaque `initData` string and extracts the identity claim.
    ///
    /// # Errors
    ///
    /// Returns a [`LaunchError`] on empty input, missing/mismatching hash,
    /// or a missing/malformed `user` field. Verification uses constant-time
    /// comparison of the derived digest.
    pub fn authenticate(&self, init_data: &str) -> Result<LaunchData, LaunchError> {
        if init_data.is_empty() {
            return Err(LaunchError::EmptyPayload);
        }
        if self.bot_token.is_empty() {
            return Err(LaunchError::NotConfigured);
        }

        let mut pairs: Vec<(String, String)> = form_urlencoded::parse(init_data.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let hash_idx = pairs
            .iter()
            .position(|(k, _)| k == "hash")
            .ok_or(LaunchError::MissingHash)?;
        let (_, provided_hash) = pairs.remove(hash_idx);

        let expected = self.compute_hash(&pairs);
        let Ok(provided) = hex::decode(&provided_hash) else {
            return Err(LaunchError::HashMismatch);
        };
        if !constant_time_compare(&expected, &provided) {
            return Err(LaunchError::HashMismatch);
        }

        let user_idx = pairs
            .iter()
            .position(|(k, _)| k == "user")
            .ok_or(LaunchError::MissingUser)?;
        let (_, user_json) = pairs.remove(user_idx);
        let user: TelegramUser =
            serde_json::from_str(&user_json).map_err(|_| LaunchError::MalformedUser)?;

        Ok(LaunchData { fields: pairs, user })
    }

    fn compute_hash(&self, pairs: &[(String, String)]) -> Vec<u8> {
        let mut sorted: Vec<&(String, String)> = pairs.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));

        let data_check_string = sorted
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("\n");

        let mut derivation = Hmac::<Sha256>::new_from_slice(KEY_DERIVATION_CONSTANT)
            .expect("HMAC accepts any key");
        derivation.update(self.bot_token.as_bytes());
        let secret_key = derivation.finalize().into_bytes();

        let mut mac =
            Hmac::<Sha256>::new_from_slice(&secret_key).expect("HMAC accepts any key");
        mac.update(data_check_string.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
