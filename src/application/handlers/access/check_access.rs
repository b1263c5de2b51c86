//! CheckAccessHandler - answers "may this user hear this episode in full".
//!
//! Viewing a free-flagged episode while the caller's free slot is unclaimed
//! claims the slot. The claim is a conditional write, so two concurrent
//! first views of different free episodes still end with exactly one slot.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::entitlement::has_full_access;
use crate::domain::foundation::{PodcastId, TelegramId};
use crate::ports::{PodcastReader, TransactionRepository, UserRepository};

/// Query asking whether a caller has full access to an episode.
#[derive(Debug, Clone)]
pub struct CheckAccessQuery {
    pub telegram_id: TelegramId,
    pub podcast_id: PodcastId,
}

/// The access verdict for one episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessVerdict {
    pub has_full_access: bool,
}

/// Errors from the access check.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("Podcast not found")]
    PodcastNotFound,

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

/// Handler resolving entitlement for one user and one episode.
pub struct CheckAccessHandler {
    users: Arc<dyn UserRepository>,
    podcasts: Arc<dyn PodcastReader>,
    transactions: Arc<dyn TransactionRepository>,
}

impl CheckAccessHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        podcasts: Arc<dyn PodcastReader>,
        transactions: Arc<dyn TransactionRepository>,
    ) -> Self {
        Self {
            users,
            podcasts,
            transactions,
        }
    }

    pub async fn handle(&self, query: CheckAccessQuery) -> Result<AccessVerdict, AccessError> {
        let podcast = self
            .podcasts
            .find_by_id(query.podcast_id)
            .await
            .map_err(infra)?
            .ok_or(AccessError::PodcastNotFound)?;

        let mut user = self
            .users
            .get_or_create(&query.telegram_id)
            .await
            .map_err(infra)?;

        if podcast.is_free && user.free_slot_available() {
            user = self
                .users
                .set_free_podcast_if_unset(user.id, podcast.id)
                .await
                .map_err(infra)?;
            tracing::info!(
                user_id = %user.id,
                podcast_id = %podcast.id,
                "free episode slot claimed"
            );
        }

        let ledger = self
            .transactions
            .list_for_user(user.id)
            .await
            .map_err(infra)?;

        Ok(AccessVerdict {
            has_full_access: has_full_access(Some(&user), &podcast, &ledger),
        })
    }
}

fn infra(e: crate::domain::foundation::DomainError) -> AccessError {
    AccessError::Infrastructure(e.to_string())
}
