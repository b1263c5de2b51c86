//! HandleWebhookHandler - applies provider notifications to the ledger.
//!
//! Verification and classification live in the domain; this handler owns
//! the side effects: the compare-and-swap settlement and the subscription
//! grant that follows a successful subscription payment.

use std::sync::Arc;

use crate::config::PaymentConfig;
use crate::domain::catalog::{Transaction, TransactionKind};
use crate::domain::payment::{
    evaluate, CanonicalPair, IgnoreReason, SettlementStatus, WebhookDecision, WebhookError,
};
use crate::ports::{SettleOutcome, TransactionRepository, UserRepository};

/// A received notification: the form-decoded body plus the `Sign` header.
#[derive(Debug, Clone)]
pub struct WebhookCommand {
    pub pairs: Vec<CanonicalPair>,
    pub sign_header: Option<String>,
}

/// What the notification did. Every variant is acknowledged with 200.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// The referenced transaction was settled by this delivery.
    Settled(Transaction),
    /// A replay of an already-settled transaction; nothing changed.
    AlreadySettled(Transaction),
    /// A well-formed reference to a transaction we never issued.
    UnknownTransaction,
    /// Verified but irrelevant to the ledger.
    Ignored(IgnoreReason),
}

/// Handler settling transactions from verified notifications.
pub struct HandleWebhookHandler {
    transactions: Arc<dyn TransactionRepository>,
    users: Arc<dyn UserRepository>,
    payment: PaymentConfig,
}

impl HandleWebhookHandler {
    pub fn new(
        transactions: Arc<dyn TransactionRepository>,
        users: Arc<dyn UserRepository>,
        payment: PaymentConfig,
    ) -> Self {
        Self {
            transactions,
            users,
            payment,
        }
    }

    pub async fn handle(&self, command: WebhookCommand) -> Result<WebhookOutcome, WebhookError> {
        let secret = self.payment.secret();
        if secret.is_none() {
            tracing::warn!("no payment secret configured, accepting webhook unverified");
        }

        let decision = evaluate(&command.pairs, secret, command.sign_header.as_deref())?;

        let (reference, status) = match decision {
            WebhookDecision::Settle { reference, status } => (reference, status),
            WebhookDecision::Ignore(reason) => {
                tracing::info!(?reason, "webhook acknowledged without settlement");
                return Ok(WebhookOutcome::Ignored(reason));
            }
        };

        let outcome = self
            .transactions
            .settle_if_pending(reference.transaction_id(), status)
            .await
            .map_err(|e| WebhookError::Database(e.to_string()))?;

        match outcome {
            SettleOutcome::Applied(transaction) => {
                if transaction.kind == TransactionKind::Subscription
                    && status == SettlementStatus::Success
                {
                    self.users
                        .grant_subscription(transaction.user_id)
                        .await
                        .map_err(|e| WebhookError::Database(e.to_string()))?;
                }
                tracing::info!(
                    order_id = %reference,
                    status = ?transaction.status,
                    "transaction settled"
                );
                Ok(WebhookOutcome::Settled(transaction))
            }
            SettleOutcome::AlreadySettled(transaction) => {
                tracing::info!(order_id = %reference, "webhook replay, already settled");
                Ok(WebhookOutcome::AlreadySettled(transaction))
            }
            SettleOutcome::NotFound => {
                tracing::warn!(order_id = %reference, "webhook for unknown transaction");
                Ok(WebhookOutcome::UnknownTransaction)
            }
        }
    }
}
