//! Outbound payment link builder.
//!
//! Produces the fully qualified redirect URL for the hosted payment page:
//! sign the canonical pairs, append the signature as a field, re-encode the
//! now-signed payload, percent-encode every key and value, and append the
//! query to the base endpoint. The builder performs no network I/O; the
//! caller owns the redirect.

use url::form_urlencoded::byte_serialize;

use super::encoder::{flatten, CanonicalPair};
use super::signature::{sign, SIGNATURE_FIELD};
use super::value::Payload;

/// Callback/routing fields the provider excludes from the signed set.
///
/// Revisions of the provider documentation disagree here, so participation
/// is a configuration flag rather than an assumption.
pub const CALLBACK_FIELDS: [&str; 3] = ["urlReturn", "urlSuccess", "urlNotification"];

/// Builds signed (or, without a secret, deliberately unsigned) payment
/// links for the hosted payment page.
#[derive(Debug, Clone)]
pub struct PaymentLinkBuilder {
    base_url: String,
    secret: Option<String>,
    sign_callback_urls: bool,
}

impl PaymentLinkBuilder {
    /// Creates a builder.
    ///
    /// An empty secret is treated as no secret: links come out unsigned,
    /// which is an explicit degraded mode for local use, not an error.
    pub fn new(base_url: impl Into<String>, secret: Option<String>, sign_callback_urls: bool) -> Self {
        Self {
            base_url: base_url.into(),
            secret: secret.filter(|s| !s.is_empty()),
            sign_callback_urls,
        }
    }

    /// Whether links produced by this builder carry a signature.
    pub fn is_signing_enabled(&self) -> bool {
        self.secret.is_some()
    }

    /// Builds the redirect URL for the given order payload.
    pub fn build(&self, payload: &Payload) -> String {
        let mut payload = payload.clone();

        if let Some(secret) = &self.secret {
            let pairs = flatten(&payload);
            let digest = sign(&self.signable_pairs(pairs), secret);
            payload.set(SIGNATURE_FIELD, digest);
        }

        let base = format!("{}/", self.base_url.trim_end_matches('/'));
        let query = encode_query(&flatten(&payload));
        if query.is_empty() {
            base
        } else {
            format!("{}?{}", base, query)
        }
    }

    fn signable_pairs(&self, pairs: Vec<CanonicalPair>) -> Vec<CanonicalPair> {
        if self.sign_callback_urls {
            return pairs;
        }
        pairs
            .into_iter()
            .filter(|(k, _)| !CALLBACK_FIELDS.contains(&k.as_str()))
            .collect()
    }
}

fn encode_query(pairs: &[CanonicalPair]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_component(raw: &str) -> String {
    byte_serialize(raw.as_bytes()).collect()
}
