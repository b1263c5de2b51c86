//! Identity claim carried inside the launch payload.

use serde::Deserialize;

/// The `user` field of Telegram WebApp init data, JSON-decoded.
///
/// Only `id` is load-bearing; the rest is display metadata Telegram may or
/// may not include.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TelegramUser {
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub language_code: Option<String>,
}

/// A successfully authenticated launch payload.
///
/// `fields` holds every pair except `hash` (consumed by verification) and
/// `user` (replaced by its parsed structure).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchData {
    pub fields: Vec<(String, String)>,
    pub user: TelegramUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_parses_with_minimal_fields() {
        let user: TelegramUser = serde_json::from_str(r#"{"id": 123456789}"#).unwrap();
        assert_eq!(user.id, 123456789);
        assert!(user.username.is_none());
    }

    #[test]
    fn user_parses_full_payload_and_ignores_extras() {
        let raw = r#"{
            "id": 99,
            "first_name": "Ada",
            "last_name": "L",
            "username": "ada",
            "language_code": "en",
            "is_premium": true
        }"#;
        let user: TelegramUser = serde_json::from_str(raw).unwrap();
        assert_eq!(user.username.as_deref(), Some("ada"));
    }
}
