//! Transaction ledger port.

use async_trait::async_trait;

use crate::domain::catalog::{Transaction, TransactionKind};
use crate::domain::foundation::{DomainError, PodcastId, TransactionId, UserId};
use crate::domain::payment::SettlementStatus;

/// Result of attempting to settle a transaction.
///
/// Settlement is a compare-and-swap on the `pending` status: concurrent or
/// replayed webhook deliveries cannot double-apply, because only the first
/// one observes `Applied`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettleOutcome {
    /// The transition was applied now; carries the settled row.
    Applied(Transaction),
    /// The transaction had already left `pending`; nothing changed.
    AlreadySettled(Transaction),
    /// No transaction with this id exists.
    NotFound,
}

/// Persistence port for the transaction ledger.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Creates a new `pending` transaction and returns it with its id.
    async fn create_pending(
        &self,
        user_id: UserId,
        kind: TransactionKind,
        podcast_id: Option<PodcastId>,
    ) -> Result<Transaction, DomainError>;

    /// Finds a transaction by id. Returns `None` when unknown.
    async fn find_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, DomainError>;

    /// Applies `pending -> success|error` iff the row is still pending.
    ///
    /// Implementations must guard the update on the current status (a
    /// conditional `UPDATE ... WHERE status = 'pending'` or equivalent) so
    /// the transition is applied exactly once under concurrency.
    async fn settle_if_pending(
        &self,
        id: TransactionId,
        status: SettlementStatus,
    ) -> Result<SettleOutcome, DomainError>;

    /// Returns the full ledger for a user, newest first.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Transaction>, DomainError>;
}
