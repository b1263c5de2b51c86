//! PostgreSQL implementation of PricingReader.
//!
//! Prices live in a single-row settings table (subscription) and on the
//! podcast rows themselves (per-episode price).

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, PodcastId};
use crate::ports::PricingReader;

/// PostgreSQL implementation of the PricingReader port.
pub struct PostgresPricingReader {
    pool: PgPool,
}

impl PostgresPricingReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PricingReader for PostgresPricingReader {
    async fn subscription_price_cents(&self) -> Result<i64, DomainError> {
        let price: Option<(i64,)> =
            sqlx::query_as("SELECT subscription_price_cents FROM pricing LIMIT 1")
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::database(format!("Failed to read subscription price: {}", e))
                })?;

        Ok(price.map(|(p,)| p).unwrap_or(0))
    }

    async fn podcast_price_cents(&self, id: PodcastId) -> Result<Option<i64>, DomainError> {
        let price: Option<(Option<i64>,)> =
            sqlx::query_as("SELECT price_cents FROM podcasts WHERE id = $1")
                .bind(id.as_i64())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::database(format!("Failed to read podcast price: {}", e))
                })?;

        Ok(price.and_then(|(p,)| p))
    }
}
