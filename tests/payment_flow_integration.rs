//! Integration tests for the purchase flow.
//!
//! Exercises the application handlers end to end over in-memory ports:
//! link creation, signed webhook settlement, idempotent replay, and the
//! entitlement answer the user finally sees.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use podcast_paywall::application::handlers::access::{CheckAccessHandler, CheckAccessQuery};
use podcast_paywall::application::handlers::payments::{
    CreatePaymentLinkCommand, CreatePaymentLinkHandler, HandleWebhookHandler, Tariff,
    WebhookCommand, WebhookOutcome,
};
use podcast_paywall::config::{PaymentConfig, TelegramConfig};
use podcast_paywall::domain::catalog::{
    Podcast, Transaction, TransactionKind, TransactionStatus, User,
};
use podcast_paywall::domain::foundation::{
    DomainError, PodcastId, TelegramId, TransactionId, UserId,
};
use podcast_paywall::domain::payment::{sign, CanonicalPair, SettlementStatus};
use podcast_paywall::ports::{
    PodcastReader, PricingReader, SettleOutcome, TransactionRepository, UserRepository,
};

const TEST_SECRET: &str = "fniwuuq7tdkwmmuq7vwi4nzbr8z1182f";

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Shared in-memory store backing all ports.
#[derive(Default)]
struct Store {
    users: Mutex<Vec<User>>,
    podcasts: Mutex<Vec<Podcast>>,
    transactions: Mutex<Vec<Transaction>>,
}

struct InMemoryUsers(Arc<Store>);

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_telegram_id(
        &self,
        telegram_id: &TelegramId,
    ) -> Result<Option<User>, DomainError> {
        Ok(self
            .0
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.telegram_id == telegram_id)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self
            .0
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn get_or_create(&self, telegram_id: &TelegramId) -> Result<User, DomainError> {
        let mut users = self.0.users.lock().unwrap();
        if let Some(user) = users.iter().find(|u| &u.telegram_id == telegram_id) {
            return Ok(user.clone());
        }
        let user = User {
            id: UserId::new(users.len() as i64 + 1),
            telegram_id: telegram_id.clone(),
            has_subscription: false,
            free_podcast_id: None,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn grant_subscription(&self, id: UserId) -> Result<(), DomainError> {
        let mut users = self.0.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.has_subscription = true;
        }
        Ok(())
    }

    async fn set_free_podcast_if_unset(
        &self,
        id: UserId,
        podcast_id: PodcastId,
    ) -> Result<User, DomainError> {
        let mut users = self.0.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| DomainError::database("no such user"))?;
        if user.free_podcast_id.is_none() {
            user.free_podcast_id = Some(podcast_id);
        }
        Ok(user.clone())
    }
}

struct InMemoryPodcasts(Arc<Store>);

#[async_trait]
impl PodcastReader for InMemoryPodcasts {
    async fn find_by_id(&self, id: PodcastId) -> Result<Option<Podcast>, DomainError> {
        Ok(self
            .0
            .podcasts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id && p.is_published)
            .cloned())
    }
}

struct InMemoryTransactions(Arc<Store>);

#[async_trait]
impl TransactionRepository for InMemoryTransactions {
    async fn create_pending(
        &self,
        user_id: UserId,
        kind: TransactionKind,
        podcast_id: Option<PodcastId>,
    ) -> Result<Transaction, DomainError> {
        let mut transactions = self.0.transactions.lock().unwrap();
        let txn = Transaction {
            id: TransactionId::new(transactions.len() as i64 + 1),
            user_id,
            kind,
            podcast_id,
            status: TransactionStatus::Pending,
            created_at: Utc::now(),
        };
        transactions.push(txn.clone());
        Ok(txn)
    }

    async fn find_by_id(&self, id: TransactionId) -> Result<Option<Transaction>, DomainError> {
        Ok(self
            .0
            .transactions
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn settle_if_pending(
        &self,
        id: TransactionId,
        status: SettlementStatus,
    ) -> Result<SettleOutcome, DomainError> {
        let mut transactions = self.0.transactions.lock().unwrap();
        let Some(txn) = transactions.iter_mut().find(|t| t.id == id) else {
            return Ok(SettleOutcome::NotFound);
        };
        if txn.status != TransactionStatus::Pending {
            return Ok(SettleOutcome::AlreadySettled(txn.clone()));
        }
        txn.status = status.into();
        Ok(SettleOutcome::Applied(txn.clone()))
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Transaction>, DomainError> {
        Ok(self
            .0
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }
}

struct FixedPricing;

#[async_trait]
impl PricingReader for FixedPricing {
    async fn subscription_price_cents(&self) -> Result<i64, DomainError> {
        Ok(95_000)
    }

    async fn podcast_price_cents(&self, _id: PodcastId) -> Result<Option<i64>, DomainError> {
        Ok(Some(19_900))
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

struct TestApp {
    store: Arc<Store>,
    link: CreatePaymentLinkHandler,
    webhook: HandleWebhookHandler,
    access: CheckAccessHandler,
}

fn test_app() -> TestApp {
    let store = Arc::new(Store::default());

    store.podcasts.lock().unwrap().extend([
        Podcast {
            id: PodcastId::new(1),
            title: "Выпуск 1".to_string(),
            is_free: true,
            is_published: true,
            published_at: Utc::now(),
        },
        Podcast {
            id: PodcastId::new(2),
            title: "Выпуск 2".to_string(),
            is_free: false,
            is_published: true,
            published_at: Utc::now(),
        },
        Podcast {
            id: PodcastId::new(3),
            title: "Выпуск 3".to_string(),
            is_free: false,
            is_published: true,
            published_at: Utc::now(),
        },
    ]);

    let payment = PaymentConfig {
        secret: Some(TEST_SECRET.to_string()),
        ..Default::default()
    };
    let telegram = TelegramConfig::default();

    let users: Arc<dyn UserRepository> = Arc::new(InMemoryUsers(store.clone()));
    let podcasts: Arc<dyn PodcastReader> = Arc::new(InMemoryPodcasts(store.clone()));
    let transactions: Arc<dyn TransactionRepository> =
        Arc::new(InMemoryTransactions(store.clone()));
    let pricing: Arc<dyn PricingReader> = Arc::new(FixedPricing);

    TestApp {
        store: store.clone(),
        link: CreatePaymentLinkHandler::new(
            users.clone(),
            podcasts.clone(),
            transactions.clone(),
            pricing,
            payment.clone(),
            telegram,
        ),
        webhook: HandleWebhookHandler::new(transactions.clone(), users.clone(), payment),
        access: CheckAccessHandler::new(users, podcasts, transactions),
    }
}

fn caller() -> TelegramId {
    TelegramId::new("123456789").unwrap()
}

async fn register(app: &TestApp) {
    // Users are created at launch authentication; simulate that first touch.
    app.store.users.lock().unwrap().push(User {
        id: UserId::new(1),
        telegram_id: caller(),
        has_subscription: false,
        free_podcast_id: None,
        created_at: Utc::now(),
    });
}

fn signed_webhook(items: &[(&str, &str)]) -> WebhookCommand {
    let pairs: Vec<CanonicalPair> = items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let digest = sign(&pairs, TEST_SECRET);
    WebhookCommand {
        pairs,
        sign_header: Some(digest),
    }
}

async fn has_access(app: &TestApp, podcast_id: i64) -> bool {
    app.access
        .handle(CheckAccessQuery {
            telegram_id: caller(),
            podcast_id: PodcastId::new(podcast_id),
        })
        .await
        .unwrap()
        .has_full_access
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn subscription_purchase_unlocks_everything() {
    let app = test_app();
    register(&app).await;

    assert!(!has_access(&app, 2).await);

    let created = app
        .link
        .handle(CreatePaymentLinkCommand {
            telegram_id: caller(),
            tariff: Tariff::Subscription,
            podcast_id: None,
        })
        .await
        .unwrap();
    let order_id = format!("txn-{}", created.transaction.id);

    let outcome = app
        .webhook
        .handle(signed_webhook(&[
            ("order_id", order_id.as_str()),
            ("status", "paid"),
            ("sum", "950.00"),
        ]))
        .await
        .unwrap();
    assert!(matches!(outcome, WebhookOutcome::Settled(_)));

    assert!(has_access(&app, 2).await);
    assert!(has_access(&app, 3).await);
}

#[tokio::test]
async fn single_purchase_unlocks_exactly_one_episode() {
    let app = test_app();
    register(&app).await;

    let created = app
        .link
        .handle(CreatePaymentLinkCommand {
            telegram_id: caller(),
            tariff: Tariff::Single,
            podcast_id: Some(PodcastId::new(2)),
        })
        .await
        .unwrap();
    let order_id = format!("txn-{}", created.transaction.id);

    app.webhook
        .handle(signed_webhook(&[
            ("order_id", order_id.as_str()),
            ("status", "success"),
        ]))
        .await
        .unwrap();

    assert!(has_access(&app, 2).await);
    assert!(!has_access(&app, 3).await);
}

#[tokio::test]
async fn webhook_replay_settles_once() {
    let app = test_app();
    register(&app).await;

    let created = app
        .link
        .handle(CreatePaymentLinkCommand {
            telegram_id: caller(),
            tariff: Tariff::Subscription,
            podcast_id: None,
        })
        .await
        .unwrap();
    let order_id = format!("txn-{}", created.transaction.id);
    let command = signed_webhook(&[("order_id", order_id.as_str()), ("status", "paid")]);

    let first = app.webhook.handle(command.clone()).await.unwrap();
    let second = app.webhook.handle(command).await.unwrap();

    assert!(matches!(first, WebhookOutcome::Settled(_)));
    assert!(matches!(second, WebhookOutcome::AlreadySettled(_)));
    assert!(has_access(&app, 2).await);
}

#[tokio::test]
async fn failed_payment_grants_nothing() {
    let app = test_app();
    register(&app).await;

    let created = app
        .link
        .handle(CreatePaymentLinkCommand {
            telegram_id: caller(),
            tariff: Tariff::Single,
            podcast_id: Some(PodcastId::new(2)),
        })
        .await
        .unwrap();
    let order_id = format!("txn-{}", created.transaction.id);

    let outcome = app
        .webhook
        .handle(signed_webhook(&[
            ("order_id", order_id.as_str()),
            ("status", "failed"),
        ]))
        .await
        .unwrap();

    assert!(
        matches!(outcome, WebhookOutcome::Settled(ref t) if t.status == TransactionStatus::Error)
    );
    assert!(!has_access(&app, 2).await);
}

#[tokio::test]
async fn webhook_for_unissued_order_is_acknowledged_noop() {
    let app = test_app();
    register(&app).await;

    let outcome = app
        .webhook
        .handle(signed_webhook(&[("order_id", "txn-42"), ("status", "paid")]))
        .await
        .unwrap();

    assert_eq!(outcome, WebhookOutcome::UnknownTransaction);
    assert!(app.store.transactions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn free_slot_claim_survives_purchases() {
    let app = test_app();
    register(&app).await;

    // First view of the free episode claims the single slot.
    assert!(has_access(&app, 1).await);

    // Buying another episode leaves the claim in place.
    let created = app
        .link
        .handle(CreatePaymentLinkCommand {
            telegram_id: caller(),
            tariff: Tariff::Single,
            podcast_id: Some(PodcastId::new(3)),
        })
        .await
        .unwrap();
    let order_id = format!("txn-{}", created.transaction.id);
    app.webhook
        .handle(signed_webhook(&[
            ("order_id", order_id.as_str()),
            ("status", "paid"),
        ]))
        .await
        .unwrap();

    assert!(has_access(&app, 1).await);
    assert!(has_access(&app, 3).await);
    assert!(!has_access(&app, 2).await);
}
