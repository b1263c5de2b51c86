//! Payment handlers: link creation and webhook settlement.

mod create_payment_link;
mod handle_webhook;

pub use create_payment_link::{
    CreatePaymentLinkCommand, CreatePaymentLinkHandler, CreatedPaymentLink, PaymentLinkError,
    Tariff,
};
pub use handle_webhook::{HandleWebhookHandler, WebhookCommand, WebhookOutcome};
