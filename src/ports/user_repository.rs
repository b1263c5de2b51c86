//! User repository port.

use async_trait::async_trait;

use crate::domain::catalog::User;
use crate::domain::foundation::{DomainError, PodcastId, TelegramId, UserId};

/// Persistence port for users.
///
/// The Telegram id is the natural key; `get_or_create` is the only way a
/// user comes into existence from this core's point of view. The two write
/// operations are deliberately narrow: the subscription flag only ever goes
/// to `true`, and the free slot is a first-write-wins conditional set.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by Telegram id. Returns `None` when unknown.
    async fn find_by_telegram_id(&self, telegram_id: &TelegramId)
        -> Result<Option<User>, DomainError>;

    /// Finds a user by internal id. Returns `None` when unknown.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Returns the user for this Telegram id, creating the row when absent.
    async fn get_or_create(&self, telegram_id: &TelegramId) -> Result<User, DomainError>;

    /// Sets `has_subscription = true`. Idempotent; never unsets.
    async fn grant_subscription(&self, id: UserId) -> Result<(), DomainError>;

    /// Sets the free-episode slot iff it is currently unset, then returns
    /// the fresh user row. A losing concurrent claim simply observes the
    /// winner's value.
    async fn set_free_podcast_if_unset(
        &self,
        id: UserId,
        podcast_id: PodcastId,
    ) -> Result<User, DomainError>;
}
