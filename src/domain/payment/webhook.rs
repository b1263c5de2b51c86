//! Webhook verification and settlement decision.
//!
//! The transport layer delivers the notification as already-flattened
//! form-encoded pairs; they are treated as canonical pairs directly and
//! never re-flattened. This function is pure: it verifies, classifies, and
//! tells the caller what (if anything) to apply to the ledger.

use super::encoder::CanonicalPair;
use super::errors::WebhookError;
use super::order_ref::OrderReference;
use super::settlement::SettlementStatus;
use super::signature::verify;

/// Name of the HTTP header carrying the provider's hex signature.
pub const SIGN_HEADER: &str = "Sign";

/// Why a notification was acknowledged without touching any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No `order_id` field in the body.
    MissingOrderId,
    /// An order reference that is not ours (foreign prefix or malformed id).
    ForeignOrder,
    /// A status outside both the success and the failure vocabulary.
    UnknownStatus,
}

/// Outcome of evaluating a verified notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookDecision {
    /// Apply this settlement to the referenced transaction (if pending).
    Settle {
        reference: OrderReference,
        status: SettlementStatus,
    },
    /// Acknowledge with `{"ok": true}` and change nothing.
    Ignore(IgnoreReason),
}

/// Verifies a notification and decides what it means for the ledger.
///
/// With a configured secret the `Sign` header is mandatory and must match
/// the recomputed digest; both failures fail closed and leave all state
/// untouched. Without a secret, verification is skipped deliberately; the
/// caller is expected to log that degraded mode, never to treat it as
/// "verified".
pub fn evaluate(
    pairs: &[CanonicalPair],
    secret: Option<&str>,
    sign_header: Option<&str>,
) -> Result<WebhookDecision, WebhookError> {
    if let Some(secret) = secret.filter(|s| !s.is_empty()) {
        let candidate = sign_header.ok_or(WebhookError::SignatureMissing)?;
        if !verify(pairs, secret, candidate) {
            return Err(WebhookError::SignatureMismatch);
        }
    }

    let order_id = lookup(pairs, "order_id").or_else(|| lookup(pairs, "orderId"));
    let Some(order_id) = order_id.filter(|s| !s.is_empty()) else {
        return Ok(WebhookDecision::Ignore(IgnoreReason::MissingOrderId));
    };

    let Some(reference) = OrderReference::parse(order_id) else {
        return Ok(WebhookDecision::Ignore(IgnoreReason::ForeignOrder));
    };

    let status = lookup(pairs, "status").unwrap_or("");
    let Some(status) = SettlementStatus::from_provider(status) else {
        return Ok(WebhookDecision::Ignore(IgnoreReason::UnknownStatus));
    };

    Ok(WebhookDecision::Settle { reference, status })
}

fn lookup<'a>(pairs: &'a [CanonicalPair], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}
