//! PostgreSQL implementation of PodcastReader.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::catalog::Podcast;
use crate::domain::foundation::{DomainError, PodcastId};
use crate::ports::PodcastReader;

/// PostgreSQL implementation of the PodcastReader port.
///
/// Only published episodes are visible through this reader.
pub struct PostgresPodcastReader {
    pool: PgPool,
}

impl PostgresPodcastReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PodcastRow {
    id: i64,
    title: String,
    is_free: bool,
    is_published: bool,
    published_at: DateTime<Utc>,
}

impl From<PodcastRow> for Podcast {
    fn from(row: PodcastRow) -> Self {
        Podcast {
            id: PodcastId::new(row.id),
            title: row.title,
            is_free: row.is_free,
            is_published: row.is_published,
            published_at: row.published_at,
        }
    }
}

#[async_trait]
impl PodcastReader for PostgresPodcastReader {
    async fn find_by_id(&self, id: PodcastId) -> Result<Option<Podcast>, DomainError> {
        let row: Option<PodcastRow> = sqlx::query_as(
            r#"
            SELECT id, title, is_free, is_published, published_at
            FROM podcasts
            WHERE id = $1 AND is_published = TRUE
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find podcast: {}", e)))?;

        Ok(row.map(Podcast::from))
    }
}
