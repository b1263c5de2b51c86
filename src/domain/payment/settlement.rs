//! Mapping of provider status strings to settlement outcomes.

use crate::domain::catalog::TransactionStatus;

/// Terminal outcome a webhook may apply to a pending transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementStatus {
    Success,
    Error,
}

impl SettlementStatus {
    /// Maps the provider's free-form `status` field.
    ///
    /// The provider is not consistent about its vocabulary, so both the
    /// documented and the observed synonyms are accepted. Anything else
    /// yields `None` and leaves the transaction untouched.
    pub fn from_provider(status: &str) -> Option<Self> {
        match status.to_ascii_lowercase().as_str() {
            "paid" | "success" | "succeeded" => Some(SettlementStatus::Success),
            "failed" | "error" | "canceled" | "cancelled" => Some(SettlementStatus::Error),
            _ => None,
        }
    }
}

impl From<SettlementStatus> for TransactionStatus {
    fn from(status: SettlementStatus) -> Self {
        match status {
            SettlementStatus::Success => TransactionStatus::Success,
            SettlementStatus::Error => TransactionStatus::Error,
        }
    }
}
