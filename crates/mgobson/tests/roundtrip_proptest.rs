//! Property-based tests for document round-trips.

#![allow(clippy::float_cmp)]

use proptest::prelude::*;

use mgobson::{BsonDocument, BsonValue, RawDocument, Value, D, M};
use mgobson_pack::bson::BsonBinary;

fn arb_key() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,8}"
}

fn arb_scalar() -> impl Strategy<Value = BsonValue> {
    prop_oneof![
        Just(BsonValue::Null),
        any::<bool>().prop_map(BsonValue::Boolean),
        any::<i32>().prop_map(BsonValue::Int32),
        any::<i64>().prop_map(BsonValue::Int64),
        any::<i64>().prop_map(BsonValue::DateTime),
        // NaN != NaN
        any::<f64>()
            .prop_filter("not NaN", |f| !f.is_nan())
            .prop_map(BsonValue::Float),
        "\\PC{0,16}".prop_map(BsonValue::Str),
        (any::<u8>(), prop::collection::vec(any::<u8>(), 0..32))
            .prop_map(|(subtype, data)| BsonValue::Binary(BsonBinary { subtype, data })),
    ]
}

/// Values whose nested documents are ordered.
fn arb_ordered_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_map(Value::Scalar).prop_recursive(3, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Slice),
            prop::collection::vec((arb_key(), inner), 0..6)
                .prop_map(|fields| Value::Ordered(fields.into_iter().collect())),
        ]
    })
}

/// Values whose nested documents are unordered.
fn arb_unordered_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_map(Value::Scalar).prop_recursive(3, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Slice),
            prop::collection::hash_map(arb_key(), inner, 0..6)
                .prop_map(|fields| Value::Unordered(fields.into_iter().collect())),
        ]
    })
}

fn arb_ordered() -> impl Strategy<Value = D> {
    prop::collection::vec((arb_key(), arb_ordered_value()), 0..8)
        .prop_map(|fields| fields.into_iter().collect())
}

fn arb_unordered() -> impl Strategy<Value = M> {
    prop::collection::hash_map(arb_key(), arb_unordered_value(), 0..8)
        .prop_map(|fields| fields.into_iter().collect())
}

fn length_prefix(bytes: &[u8]) -> usize {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize
}

proptest! {
    #[test]
    fn ordered_roundtrip(doc in arb_ordered()) {
        let bytes = doc.to_bytes().unwrap();
        prop_assert_eq!(length_prefix(&bytes), bytes.len());
        prop_assert_eq!(D::decode(&bytes).unwrap(), doc);
    }

    #[test]
    fn unordered_roundtrip(doc in arb_unordered()) {
        let bytes = doc.to_bytes().unwrap();
        prop_assert_eq!(length_prefix(&bytes), bytes.len());
        prop_assert_eq!(M::decode(&bytes).unwrap(), doc);
    }

    #[test]
    fn raw_reencodes_byte_for_byte(doc in arb_ordered()) {
        let bytes = doc.to_bytes().unwrap();
        let raw = RawDocument::decode(&bytes).unwrap();
        prop_assert_eq!(raw.len(), doc.len());
        prop_assert_eq!(raw.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn representations_agree_on_document_model(doc in arb_ordered()) {
        let model = doc.to_document_model().unwrap();
        let bytes = doc.to_bytes().unwrap();
        prop_assert_eq!(RawDocument::decode(&bytes).unwrap().to_document_model().unwrap(), model.clone());
        prop_assert_eq!(D::decode(&bytes).unwrap().to_document_model().unwrap(), model);
    }

    #[test]
    fn truncated_input_never_panics(doc in arb_ordered(), cut in any::<prop::sample::Index>()) {
        let bytes = doc.to_bytes().unwrap();
        let cut = cut.index(bytes.len());
        let truncated = &bytes[..cut];
        prop_assert!(D::decode(truncated).is_err());
        prop_assert!(M::decode(truncated).is_err());
        prop_assert!(RawDocument::decode(truncated).is_err());
    }
}
