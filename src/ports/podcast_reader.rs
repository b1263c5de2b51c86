//! Podcast reader port.

use async_trait::async_trait;

use crate::domain::catalog::Podcast;
use crate::domain::foundation::{DomainError, PodcastId};

/// Read-only access to the episode catalogue.
///
/// The admin interface owns the write side; the paywall only ever reads.
#[async_trait]
pub trait PodcastReader: Send + Sync {
    /// Finds an episode by id. Returns `None` when unknown or unpublished
    /// content should not be resolved by the implementation.
    async fn find_by_id(&self, id: PodcastId) -> Result<Option<Podcast>, DomainError>;
}
