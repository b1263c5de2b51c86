//! PostgreSQL implementation of TransactionRepository.
//!
//! Settlement is a conditional UPDATE guarded on the pending status, which
//! is what makes webhook replays and concurrent deliveries idempotent.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::catalog::{Transaction, TransactionKind, TransactionStatus};
use crate::domain::foundation::{DomainError, PodcastId, TransactionId, UserId};
use crate::domain::payment::SettlementStatus;
use crate::ports::{SettleOutcome, TransactionRepository};

/// PostgreSQL implementation of the TransactionRepository port.
pub struct PostgresTransactionRepository {
    pool: PgPool,
}

impl PostgresTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: i64,
    user_id: i64,
    kind: String,
    podcast_id: Option<i64>,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = DomainError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let kind = TransactionKind::parse(&row.kind)
            .ok_or_else(|| DomainError::database(format!("Invalid kind value: {}", row.kind)))?;
        let status = TransactionStatus::parse(&row.status).ok_or_else(|| {
            DomainError::database(format!("Invalid status value: {}", row.status))
        })?;

        Ok(Transaction {
            id: TransactionId::new(row.id),
            user_id: UserId::new(row.user_id),
            kind,
            podcast_id: row.podcast_id.map(PodcastId::new),
            status,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl TransactionRepository for PostgresTransactionRepository {
    async fn create_pending(
        &self,
        user_id: UserId,
        kind: TransactionKind,
        podcast_id: Option<PodcastId>,
    ) -> Result<Transaction, DomainError> {
        let row: TransactionRow = sqlx::query_as(
            r#"
            INSERT INTO transactions (user_id, kind, podcast_id, status)
            VALUES ($1, $2, $3, 'pending')
            RETURNING id, user_id, kind, podcast_id, status, created_at
            "#,
        )
        .bind(user_id.as_i64())
        .bind(kind.as_str())
        .bind(podcast_id.map(|p| p.as_i64()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to create transaction: {}", e)))?;

        Transaction::try_from(row)
    }

    async fn find_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, DomainError> {
        let row: Option<TransactionRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, kind, podcast_id, status, created_at
            FROM transactions
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find transaction: {}", e)))?;

        row.map(Transaction::try_from).transpose()
    }

    async fn settle_if_pending(
        &self,
        id: TransactionId,
        status: SettlementStatus,
    ) -> Result<SettleOutcome, DomainError> {
        let next: TransactionStatus = status.into();

        let row: Option<TransactionRow> = sqlx::query_as(
            r#"
            UPDATE transactions
            SET status = $2
            WHERE id = $1 AND status = 'pending'
            RETURNING id, user_id, kind, podcast_id, status, created_at
            "#,
        )
        .bind(id.as_i64())
        .bind(next.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to settle transaction: {}", e)))?;

        if let Some(row) = row {
            return Ok(SettleOutcome::Applied(Transaction::try_from(row)?));
        }

        // No row updated: either already settled or never existed.
        match self.find_by_id(id).await? {
            Some(transaction) => Ok(SettleOutcome::AlreadySettled(transaction)),
            None => Ok(SettleOutcome::NotFound),
        }
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Transaction>, DomainError> {
        let rows: Vec<TransactionRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, kind, podcast_id, status, created_at
            FROM transactions
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list transactions: {}", e)))?;

        rows.into_iter().map(Transaction::try_from).collect()
    }
}
