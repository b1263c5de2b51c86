//! Canonical payload encoder.
//!
//! Flattens a nested order payload into the ordered `(key, value)` pairs the
//! provider's PHP-style array serialization expects:
//!
//! - `products` (a list of line-item maps) expands positionally to
//!   `products[<i>][<field>]`, and nested maps inside a product to
//!   `products[<i>][<field>][<sub>]`;
//! - any other map expands to `<field>[<k>]`, recursively;
//! - any other list expands to `<field>[<i>]`.
//!
//! A missing bracket level does not fail loudly anywhere; it surfaces as a
//! signature mismatch on the provider's side. For that reason this is the
//! only flattener in the crate: outbound signing, outbound query assembly
//! and inbound webhook verification all run through [`flatten`].

use super::value::{Payload, Value};

/// A flattened canonical pair. Ordering and key shape are part of the wire
/// contract, not incidental.
pub type CanonicalPair = (String, String);

/// Flattens a payload into canonical pairs, preserving field order.
pub fn flatten(payload: &Payload) -> Vec<CanonicalPair> {
    let mut pairs = Vec::new();
    for (key, value) in payload.fields() {
        flatten_value(key, value, &mut pairs);
    }
    pairs
}

fn flatten_value(key: &str, value: &Value, out: &mut Vec<CanonicalPair>) {
    match value {
        Value::Map(entries) => {
            for (sub_key, sub_value) in entries {
                flatten_value(&format!("{}[{}]", key, sub_key), sub_value, out);
            }
        }
        Value::List(items) => {
            for (idx, item) in items.iter().enumerate() {
                flatten_value(&format!("{}[{}]", key, idx), item, out);
            }
        }
        scalar => {
            if let Some(text) = scalar.as_scalar() {
                out.push((key.to_string(), text));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn product(name: &str, price: i64, quantity: i64) -> Value {
        Value::Map(vec![
            ("name".into(), Value::Text(name.into())),
            ("price".into(), Value::Int(price)),
            ("quantity".into(), Value::Int(quantity)),
        ])
    }

    #[test]
    fn products_expand_with_index_and_field_brackets() {
        let mut payload = Payload::new();
        payload.set("order_id", "txn-7");
        payload.set("products", Value::List(vec![product("Episode 12", 950, 1)]));

        let pairs = flatten(&payload);

        assert_eq!(
            pairs,
            vec![
                ("order_id".to_string(), "txn-7".to_string()),
                ("products[0][name]".to_string(), "Episode 12".to_string()),
                ("products[0][price]".to_string(), "950".to_string()),
                ("products[0][quantity]".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn nested_map_inside_product_gets_third_bracket_level() {
        let tax = Value::Map(vec![("tax_type".into(), Value::Int(0))]);
        let mut item = vec![("name".into(), Value::Text("Episode".into()))];
        item.push(("tax".into(), tax));

        let mut payload = Payload::new();
        payload.set("products", Value::List(vec![Value::Map(item)]));

        let pairs = flatten(&payload);
        assert!(pairs.contains(&("products[0][tax][tax_type]".to_string(), "0".to_string())));
    }

    #[test]
    fn generic_map_uses_single_bracket_per_level() {
        let mut payload = Payload::new();
        payload.set(
            "customer",
            Value::Map(vec![
                ("email".into(), Value::Text("a@b.c".into())),
                (
                    "address".into(),
                    Value::Map(vec![("city".into(), Value::Text("Perm".into()))]),
                ),
            ]),
        );

        let pairs = flatten(&payload);
        assert_eq!(
            pairs,
            vec![
                ("customer[email]".to_string(), "a@b.c".to_string()),
                ("customer[address][city]".to_string(), "Perm".to_string()),
            ]
        );
    }

    #[test]
    fn non_product_list_expands_positionally() {
        let mut payload = Payload::new();
        payload.set(
            "tags",
            Value::List(vec![Value::Text("a".into()), Value::Text("b".into())]),
        );

        let pairs = flatten(&payload);
        assert_eq!(
            pairs,
            vec![
                ("tags[0]".to_string(), "a".to_string()),
                ("tags[1]".to_string(), "b".to_string()),
            ]
        );
    }

    #[test]
    fn absent_fields_never_appear() {
        let mut payload = Payload::new();
        payload
            .set("order_id", "txn-1")
            .set_opt("customer_phone", None::<&str>)
            .set_opt("customer_email", None::<&str>);

        let pairs = flatten(&payload);
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["order_id"]);
    }

    #[test]
    fn no_duplicate_keys_in_different_bracket_shapes() {
        let mut payload = Payload::new();
        payload.set("order_id", "txn-9");
        payload.set(
            "products",
            Value::List(vec![product("A", 100, 1), product("B", 200, 2)]),
        );
        payload.set("customer_extra", "tg:42");

        let pairs = flatten(&payload);
        let unique: HashSet<&String> = pairs.iter().map(|(k, _)| k).collect();
        assert_eq!(unique.len(), pairs.len());
    }
}
