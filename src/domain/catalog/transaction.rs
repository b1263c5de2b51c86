//! Payment transaction entity and its status state machine.

use chrono::{DateTime, Utc};

use crate::domain::foundation::{PodcastId, TransactionId, UserId};

/// What a transaction pays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// Grants the permanent subscription flag on settlement.
    Subscription,
    /// Grants access to exactly one episode on settlement.
    SinglePodcast,
}

impl TransactionKind {
    /// Stable string form used in persistence and the provider payload.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Subscription => "subscription",
            TransactionKind::SinglePodcast => "single",
        }
    }

    /// Parses the stored string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "subscription" => Some(TransactionKind::Subscription),
            "single" => Some(TransactionKind::SinglePodcast),
            _ => None,
        }
    }
}

/// Transaction status.
///
/// The only legal transitions are `Pending -> Success` and
/// `Pending -> Error`; a settled transaction is never reopened or deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Pending,
    Success,
    Error,
}

impl TransactionStatus {
    /// Stable string form used in persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Success => "success",
            TransactionStatus::Error => "error",
        }
    }

    /// Parses the stored string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TransactionStatus::Pending),
            "success" => Some(TransactionStatus::Success),
            "error" => Some(TransactionStatus::Error),
            _ => None,
        }
    }

    /// Whether a transition to `next` is allowed from this status.
    pub fn can_transition_to(&self, next: TransactionStatus) -> bool {
        matches!(
            (self, next),
            (
                TransactionStatus::Pending,
                TransactionStatus::Success | TransactionStatus::Error
            )
        )
    }
}

/// A ledger entry created pending at link-build time and settled exactly
/// once by the webhook handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: UserId,
    pub kind: TransactionKind,
    /// Present iff `kind` is [`TransactionKind::SinglePodcast`].
    pub podcast_id: Option<PodcastId>,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Whether this entry is a settled purchase of the given episode.
    pub fn is_settled_purchase_of(&self, podcast_id: PodcastId) -> bool {
        self.kind == TransactionKind::SinglePodcast
            && self.status == TransactionStatus::Success
            && self.podcast_id == Some(podcast_id)
    }
}
