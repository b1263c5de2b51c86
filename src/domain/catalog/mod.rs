//! Persisted entities the paywall core operates on.
//!
//! The administration interface owns the full catalogue schema; this module
//! carries only the projection the payment and entitlement logic needs.

mod podcast;
mod transaction;
mod user;

pub use podcast::Podcast;
pub use transaction::{Transaction, TransactionKind, TransactionStatus};
pub use user::User;
