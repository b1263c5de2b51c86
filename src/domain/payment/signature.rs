//! HMAC-SHA256 signature over canonical pairs.
//!
//! The signing string is built from **raw** (percent-decoded) values: the
//! outbound link encodes its query after signing, and the inbound webhook
//! body is decoded before verifying, so both directions agree on one
//! canonical representation. Breaking that symmetry is the classic defect
//! in this integration.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::encoder::CanonicalPair;

/// Key carrying the computed signature; never part of the signed material.
pub const SIGNATURE_FIELD: &str = "signature";

/// Computes the provider signature for a set of canonical pairs.
///
/// Pairs are sorted lexicographically by key, joined as `key=value` with
/// `&`, and HMAC-SHA256 is taken over the UTF-8 bytes of that string. The
/// result is rendered as lowercase hex. The `signature` field itself is
/// skipped so that signing an already-signed payload is stable.
pub fn sign(pairs: &[CanonicalPair], secret: &str) -> String {
    hex::encode(compute_mac(pairs, secret))
}

/// Recomputes the signature and compares it to a candidate hex digest in
/// constant time. An undecodable candidate is a mismatch, not an error.
pub fn verify(pairs: &[CanonicalPair], secret: &str, candidate: &str) -> bool {
    let Ok(candidate_bytes) = hex::decode(candidate) else {
        return false;
    };
    constant_time_compare(&compute_mac(pairs, secret), &candidate_bytes)
}

fn compute_mac(pairs: &[CanonicalPair], secret: &str) -> Vec<u8> {
    let mut sorted: Vec<&CanonicalPair> = pairs
        .iter()
        .filter(|(k, _)| k != SIGNATURE_FIELD)
        .collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    let sign_src = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key");
    mac.update(sign_src.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TEST_SECRET: &str = "2y2aw4oknnke80bp1a8fniwuuq7tdkwm";

    fn pairs(items: &[(&str, &str)]) -> Vec<CanonicalPair> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn sign_is_lowercase_hex_of_expected_length() {
        let digest = sign(&pairs(&[("order_id", "txn-1")]), TEST_SECRET);
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn sign_is_independent_of_input_order() {
        let forward = pairs(&[
            ("order_id", "txn-5"),
            ("products[0][name]", "Episode"),
            ("products[0][price]", "950"),
        ]);
        let mut reversed = forward.clone();
        reversed.reverse();

        assert_eq!(sign(&forward, TEST_SECRET), sign(&reversed, TEST_SECRET));
    }

    #[test]
    fn signature_field_is_excluded_from_signing() {
        let unsigned = pairs(&[("order_id", "txn-5"), ("do", "pay")]);
        let mut signed = unsigned.clone();
        signed.push((SIGNATURE_FIELD.to_string(), "deadbeef".to_string()));

        assert_eq!(sign(&unsigned, TEST_SECRET), sign(&signed, TEST_SECRET));
    }

    #[test]
    fn verify_round_trips() {
        let p = pairs(&[("order_id", "txn-5"), ("status", "success")]);
        let digest = sign(&p, TEST_SECRET);
        assert!(verify(&p, TEST_SECRET, &digest));
    }

    #[test]
    fn verify_rejects_tampered_value() {
        let p = pairs(&[("order_id", "txn-5"), ("status", "success")]);
        let digest = sign(&p, TEST_SECRET);

        let tampered = pairs(&[("order_id", "txn-6"), ("status", "success")]);
        assert!(!verify(&tampered, TEST_SECRET, &digest));
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let p = pairs(&[("order_id", "txn-5")]);
        let digest = sign(&p, TEST_SECRET);
        assert!(!verify(&p, "another-secret", &digest));
    }

    #[test]
    fn verify_rejects_non_hex_candidate() {
        let p = pairs(&[("order_id", "txn-5")]);
        assert!(!verify(&p, TEST_SECRET, "not hex at all"));
    }

    #[test]
    fn verify_rejects_truncated_candidate() {
        let p = pairs(&[("order_id", "txn-5")]);
        let digest = sign(&p, TEST_SECRET);
        assert!(!verify(&p, TEST_SECRET, &digest[..32]));
    }

    proptest! {
        #[test]
        fn sign_is_deterministic_under_shuffle(
            values in proptest::collection::vec("[a-z0-9]{1,12}", 1..8)
        ) {
            let original: Vec<CanonicalPair> = values
                .iter()
                .enumerate()
                .map(|(i, v)| (format!("k{}", i), v.clone()))
                .collect();
            let mut shuffled = original.clone();
            shuffled.rotate_left(original.len() / 2);

            prop_assert_eq!(sign(&original, TEST_SECRET), sign(&shuffled, TEST_SECRET));
        }

        #[test]
        fn tampering_any_value_flips_verification(
            values in proptest::collection::vec("[a-z0-9]{1,12}", 1..8),
            idx in 0usize..8,
        ) {
            let original: Vec<CanonicalPair> = values
                .iter()
                .enumerate()
                .map(|(i, v)| (format!("k{}", i), v.clone()))
                .collect();
            let digest = sign(&original, TEST_SECRET);

            let mut tampered = original.clone();
            let slot = idx % tampered.len();
            tampered[slot].1.push('!');

            prop_assert!(verify(&original, TEST_SECRET, &digest));
            prop_assert!(!verify(&tampered, TEST_SECRET, &digest));
        }
    }
}
