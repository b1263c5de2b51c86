//! CreatePaymentLinkHandler - starts a purchase.
//!
//! Rejects callers who are already entitled, records a pending ledger
//! entry, and assembles the signed redirect URL. No network call happens
//! here; the front-end performs the redirect.

use std::sync::Arc;

use thiserror::Error;

use crate::config::{PaymentConfig, TelegramConfig};
use crate::domain::catalog::{Transaction, TransactionKind, User};
use crate::domain::entitlement::has_full_access;
use crate::domain::foundation::{PodcastId, TelegramId};
use crate::domain::payment::{OrderReference, PaymentLinkBuilder, Payload, Value};
use crate::ports::{PodcastReader, PricingReader, TransactionRepository, UserRepository};

/// What the caller wants to buy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tariff {
    Subscription,
    Single,
}

/// Command to create a payment link.
#[derive(Debug, Clone)]
pub struct CreatePaymentLinkCommand {
    pub telegram_id: TelegramId,
    pub tariff: Tariff,
    /// Required iff `tariff` is [`Tariff::Single`].
    pub podcast_id: Option<PodcastId>,
}

/// A freshly built link plus its pending ledger entry.
#[derive(Debug, Clone)]
pub struct CreatedPaymentLink {
    pub link: String,
    pub transaction: Transaction,
}

/// Errors from link creation.
#[derive(Debug, Error)]
pub enum PaymentLinkError {
    #[error("User not found")]
    UserNotFound,

    #[error("Podcast not found")]
    PodcastNotFound,

    #[error("Single tariff requires a podcast id")]
    MissingPodcastId,

    #[error("Caller already has access to this content")]
    AlreadyEntitled,

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

/// Handler assembling signed payment links.
pub struct CreatePaymentLinkHandler {
    users: Arc<dyn UserRepository>,
    podcasts: Arc<dyn PodcastReader>,
    transactions: Arc<dyn TransactionRepository>,
    pricing: Arc<dyn PricingReader>,
    payment: PaymentConfig,
    telegram: TelegramConfig,
}

impl CreatePaymentLinkHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        podcasts: Arc<dyn PodcastReader>,
        transactions: Arc<dyn TransactionRepository>,
        pricing: Arc<dyn PricingReader>,
        payment: PaymentConfig,
        telegram: TelegramConfig,
    ) -> Self {
        Self {
            users,
            podcasts,
            transactions,
            pricing,
            payment,
            telegram,
        }
    }

    pub async fn handle(
        &self,
        command: CreatePaymentLinkCommand,
    ) -> Result<CreatedPaymentLink, PaymentLinkError> {
        let user = self
            .users
            .find_by_telegram_id(&command.telegram_id)
            .await
            .map_err(infra)?
            .ok_or(PaymentLinkError::UserNotFound)?;

        let (kind, podcast_id, product_name, price_cents) = match command.tariff {
            Tariff::Subscription => {
                if user.has_subscription {
                    return Err(PaymentLinkError::AlreadyEntitled);
                }
                let price = self.pricing.subscription_price_cents().await.map_err(infra)?;
                (TransactionKind::Subscription, None, "Подписка".to_string(), price)
            }
            Tariff::Single => {
                let podcast_id = command.podcast_id.ok_or(PaymentLinkError::MissingPodcastId)?;
                let podcast = self
                    .podcasts
                    .find_by_id(podcast_id)
                    .await
                    .map_err(infra)?
                    .ok_or(PaymentLinkError::PodcastNotFound)?;

                self.reject_if_entitled(&user, &podcast).await?;

                let price = self
                    .pricing
                    .podcast_price_cents(podcast_id)
                    .await
                    .map_err(infra)?
                    .unwrap_or(0);
                (
                    TransactionKind::SinglePodcast,
                    Some(podcast_id),
                    format!("Подкаст: {}", podcast.title),
                    price,
                )
            }
        };

        let transaction = self
            .transactions
            .create_pending(user.id, kind, podcast_id)
            .await
            .map_err(infra)?;

        let payload = self.order_payload(&transaction, &user, &product_name, price_cents);

        let builder = PaymentLinkBuilder::new(
            self.payment.base_url.clone(),
            self.payment.secret().map(str::to_owned),
            self.payment.sign_callback_urls,
        );
        if !builder.is_signing_enabled() {
            tracing::warn!(
                order_id = %OrderReference::new(transaction.id),
                "no payment secret configured, building unsigned link"
            );
        }
        let link = builder.build(&payload);

        tracing::info!(
            user_id = %user.id,
            telegram_id = %user.telegram_id,
            tariff = kind.as_str(),
            price_cents,
            order_id = %OrderReference::new(transaction.id),
            "payment link created"
        );

        Ok(CreatedPaymentLink { link, transaction })
    }

    async fn reject_if_entitled(
        &self,
        user: &User,
        podcast: &crate::domain::catalog::Podcast,
    ) -> Result<(), PaymentLinkError> {
        let ledger = self.transactions.list_for_user(user.id).await.map_err(infra)?;
        if has_full_access(Some(user), podcast, &ledger) {
            return Err(PaymentLinkError::AlreadyEntitled);
        }
        Ok(())
    }

    fn order_payload(
        &self,
        transaction: &Transaction,
        user: &User,
        product_name: &str,
        price_cents: i64,
    ) -> Payload {
        // The provider takes whole currency units.
        let price_rub = (price_cents / 100).max(0);
        let base = self.telegram.webapp_base();

        let mut payload = Payload::new();
        payload
            .set("order_id", OrderReference::new(transaction.id).to_string())
            .set(
                "products",
                Value::List(vec![Value::Map(vec![
                    ("name".into(), Value::Text(product_name.to_string())),
                    ("price".into(), Value::Int(price_rub)),
                    ("quantity".into(), Value::Int(1)),
                ])]),
            )
            .set("customer_extra", format!("tg:{}", user.telegram_id))
            .set("do", "pay")
            .set("urlReturn", format!("{}/failed", base))
            .set("urlSuccess", format!("{}/success", base))
            .set("urlNotification", format!("{}/api/payments/webhook", base))
            .set_opt("sys", self.payment.sys.clone());
        payload
    }
}

fn infra(e: crate::domain::foundation::DomainError) -> PaymentLinkError {
    PaymentLinkError::Infrastructure(e.to_string())
}
