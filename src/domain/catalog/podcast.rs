//! Podcast episode entity.

use chrono::{DateTime, Utc};

use crate::domain::foundation::PodcastId;

/// A paid (or free-flagged) audio episode.
///
/// Media paths, descriptions and the rest of the catalogue live outside this
/// core; only the fields the entitlement and payment logic consume appear
/// here. The price is kept separately in [`crate::ports::PricingReader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Podcast {
    pub id: PodcastId,
    pub title: String,
    pub is_free: bool,
    pub is_published: bool,
    pub published_at: DateTime<Utc>,
}
