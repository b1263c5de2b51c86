//! User entity.

use chrono::{DateTime, Utc};

use crate::domain::foundation::{PodcastId, TelegramId, UserId};

/// An end user identified by their Telegram id.
///
/// Two pieces of state matter to the paywall:
/// - `has_subscription` is monotonic: once granted by a settled subscription
///   transaction it is never reset by this core.
/// - `free_podcast_id` is the single free-episode allocation. It is written
///   at most once (first claim wins) and only through an explicit repository
///   claim; the access resolver itself never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub telegram_id: TelegramId,
    pub has_subscription: bool,
    pub free_podcast_id: Option<PodcastId>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether this user may still claim a free episode slot.
    pub fn free_slot_available(&self) -> bool {
        self.free_podcast_id.is_none()
    }
}
