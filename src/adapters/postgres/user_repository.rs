//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::catalog::User;
use crate::domain::foundation::{DomainError, PodcastId, TelegramId, UserId};
use crate::ports::UserRepository;

/// PostgreSQL implementation of the UserRepository port.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    telegram_id: String,
    has_subscription: bool,
    free_podcast_id: Option<i64>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::new(row.id),
            telegram_id: TelegramId::new(row.telegram_id)
                .map_err(|e| DomainError::database(format!("Invalid telegram_id: {}", e)))?,
            has_subscription: row.has_subscription,
            free_podcast_id: row.free_podcast_id.map(PodcastId::new),
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_telegram_id(
        &self,
        telegram_id: &TelegramId,
    ) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, telegram_id, has_subscription, free_podcast_id, created_at
            FROM users
            WHERE telegram_id = $1
            "#,
        )
        .bind(telegram_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find user: {}", e)))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, telegram_id, has_subscription, free_podcast_id, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find user: {}", e)))?;

        row.map(User::try_from).transpose()
    }

    async fn get_or_create(&self, telegram_id: &TelegramId) -> Result<User, DomainError> {
        // Concurrent first contacts race on the unique telegram_id index;
        // ON CONFLICT makes both arrive at the same row.
        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (telegram_id)
            VALUES ($1)
            ON CONFLICT (telegram_id) DO UPDATE SET telegram_id = EXCLUDED.telegram_id
            RETURNING id, telegram_id, has_subscription, free_podcast_id, created_at
            "#,
        )
        .bind(telegram_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to get or create user: {}", e)))?;

        User::try_from(row)
    }

    async fn grant_subscription(&self, id: UserId) -> Result<(), DomainError> {
        // Monotonic: sets the flag, never clears it. Re-granting is a no-op.
        sqlx::query("UPDATE users SET has_subscription = TRUE WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to grant subscription: {}", e)))?;

        Ok(())
    }

    async fn set_free_podcast_if_unset(
        &self,
        id: UserId,
        podcast_id: PodcastId,
    ) -> Result<User, DomainError> {
        // Conditional write: an already-claimed slot is left untouched.
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            UPDATE users
            SET free_podcast_id = $2
            WHERE id = $1 AND free_podcast_id IS NULL
            RETURNING id, telegram_id, has_subscription, free_podcast_id, created_at
            "#,
        )
        .bind(id.as_i64())
        .bind(podcast_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to claim free slot: {}", e)))?;

        match row {
            Some(row) => User::try_from(row),
            // Lost the race or the slot was already set; re-read the row.
            None => self.find_by_id(id).await?.ok_or_else(|| {
                DomainError::database(format!("User {} disappeared during claim", id))
            }),
        }
    }
}
