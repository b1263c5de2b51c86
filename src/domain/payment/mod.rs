//! Payment signing & webhook verification protocol.
//!
//! Everything here is byte-exact wire contract: the canonical flattening of
//! the order payload, the HMAC-SHA256 signature over it, the outbound link
//! assembly and the inbound notification verification all share one encoder
//! and one canonical (raw, percent-decoded) representation.

mod encoder;
mod errors;
mod link;
mod order_ref;
mod settlement;
mod signature;
mod value;
mod webhook;

pub use encoder::{flatten, CanonicalPair};
pub use errors::WebhookError;
pub use link::{PaymentLinkBuilder, CALLBACK_FIELDS};
pub use order_ref::OrderReference;
pub use settlement::SettlementStatus;
pub use signature::{sign, verify, SIGNATURE_FIELD};
pub use value::{Payload, Value};
pub use webhook::{evaluate, IgnoreReason, WebhookDecision, SIGN_HEADER};
