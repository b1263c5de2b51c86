//! Order reference: the opaque string embedding a transaction id.
//!
//! The provider echoes `order_id` back verbatim in its notification, so the
//! transaction id must survive the round trip. Anything not carrying our
//! `txn-` prefix is a foreign or test order and is none of our business.

use std::fmt;

use crate::domain::foundation::TransactionId;

const PREFIX: &str = "txn-";

/// A recognized order reference of the form `txn-<integer id>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderReference(TransactionId);

impl OrderReference {
    /// Wraps a transaction id.
    pub fn new(id: TransactionId) -> Self {
        Self(id)
    }

    /// The embedded transaction id.
    pub fn transaction_id(&self) -> TransactionId {
        self.0
    }

    /// Parses a provider-echoed order id.
    ///
    /// Returns `None` for foreign prefixes or malformed ids; callers treat
    /// that as an acknowledged no-op, never as an error.
    pub fn parse(raw: &str) -> Option<Self> {
        let id = raw.strip_prefix(PREFIX)?;
        id.parse().ok().map(|id: i64| Self(TransactionId::new(id)))
    }
}

impl fmt::Display for OrderReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", PREFIX, self.0)
    }
}
