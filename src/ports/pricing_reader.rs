//! Pricing configuration port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PodcastId};

/// Read-only access to price configuration, in integer minor currency
/// units (kopecks). Prices are maintained by the admin interface.
#[async_trait]
pub trait PricingReader: Send + Sync {
    /// The subscription price. Zero when not configured.
    async fn subscription_price_cents(&self) -> Result<i64, DomainError>;

    /// The single-purchase price of one episode. `None` when no price row
    /// exists for it.
    async fn podcast_price_cents(&self, id: PodcastId) -> Result<Option<i64>, DomainError>;
}
