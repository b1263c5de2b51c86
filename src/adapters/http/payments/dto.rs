//! HTTP DTOs for payment endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::payments::{CreatedPaymentLink, Tariff};
use crate::domain::payment::OrderReference;

/// What the caller wants to buy, in wire form.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TariffDto {
    Subscription,
    Single,
}

impl From<TariffDto> for Tariff {
    fn from(dto: TariffDto) -> Self {
        match dto {
            TariffDto::Subscription => Tariff::Subscription,
            TariffDto::Single => Tariff::Single,
        }
    }
}

/// Request to create a payment link.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLinkRequest {
    pub tariff: TariffDto,
    /// Required when `tariff` is `single`.
    #[serde(default)]
    pub podcast_id: Option<i64>,
}

/// Response carrying the redirect URL for the provider's payment page.
#[derive(Debug, Clone, Serialize)]
pub struct CreateLinkResponse {
    pub payment_url: String,
    pub order_id: String,
}

impl From<CreatedPaymentLink> for CreateLinkResponse {
    fn from(created: CreatedPaymentLink) -> Self {
        Self {
            payment_url: created.link,
            order_id: OrderReference::new(created.transaction.id).to_string(),
        }
    }
}

/// Acknowledgement body for webhook deliveries.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAck {
    pub ok: bool,
}
