//! Property-based tests for the BSON encoder, decoder and element iterator.

#![allow(clippy::float_cmp)]

use mgobson_pack::bson::{
    BsonBinary, BsonDbPointer, BsonDecimal128, BsonDecoder, BsonElementIter, BsonEncoder,
    BsonJavascriptCode, BsonJavascriptCodeWithScope, BsonObjectId, BsonSymbol, BsonTimestamp,
    BsonValue,
};
use proptest::prelude::*;

fn arb_key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,6}"
}

fn arb_text() -> impl Strategy<Value = String> {
    "\\PC{0,12}"
}

fn arb_object_id() -> impl Strategy<Value = BsonObjectId> {
    any::<[u8; 12]>().prop_map(BsonObjectId::from_bytes)
}

fn arb_leaf() -> impl Strategy<Value = BsonValue> {
    prop_oneof![
        any::<f64>()
            .prop_filter("not NaN", |f| !f.is_nan())
            .prop_map(BsonValue::Float),
        arb_text().prop_map(BsonValue::Str),
        (any::<u8>(), prop::collection::vec(any::<u8>(), 0..24))
            .prop_map(|(subtype, data)| BsonValue::Binary(BsonBinary { subtype, data })),
        Just(BsonValue::Undefined),
        arb_object_id().prop_map(BsonValue::ObjectId),
        any::<bool>().prop_map(BsonValue::Boolean),
        any::<i64>().prop_map(BsonValue::DateTime),
        Just(BsonValue::Null),
        ("[a-z.*+]{0,8}", "[imsx]{0,4}").prop_map(|(p, f)| BsonValue::Regex(p, f)),
        (arb_text(), arb_object_id())
            .prop_map(|(name, id)| BsonValue::DbPointer(BsonDbPointer { name, id })),
        arb_text().prop_map(|code| BsonValue::JavaScriptCode(BsonJavascriptCode { code })),
        arb_text().prop_map(|symbol| BsonValue::Symbol(BsonSymbol { symbol })),
        any::<i32>().prop_map(BsonValue::Int32),
        (any::<u32>(), any::<u32>()).prop_map(|(increment, timestamp)| {
            BsonValue::Timestamp(BsonTimestamp {
                increment,
                timestamp,
            })
        }),
        any::<i64>().prop_map(BsonValue::Int64),
        any::<[u8; 16]>().prop_map(|b| BsonValue::Decimal128(BsonDecimal128 { data: b.to_vec() })),
        Just(BsonValue::MinKey),
        Just(BsonValue::MaxKey),
    ]
}

fn arb_value() -> impl Strategy<Value = BsonValue> {
    arb_leaf().prop_recursive(3, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(BsonValue::Array),
            prop::collection::vec((arb_key(), inner.clone()), 0..6).prop_map(BsonValue::Document),
            (arb_text(), prop::collection::vec((arb_key(), inner), 0..4)).prop_map(
                |(code, scope)| {
                    BsonValue::JavaScriptCodeWithScope(BsonJavascriptCodeWithScope { code, scope })
                }
            ),
        ]
    })
}

fn arb_document() -> impl Strategy<Value = Vec<(String, BsonValue)>> {
    prop::collection::vec((arb_key(), arb_value()), 0..8)
}

proptest! {
    #[test]
    fn document_roundtrip(fields in arb_document()) {
        let bytes = BsonEncoder::new().encode(&fields).unwrap();
        let declared = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        prop_assert_eq!(declared as usize, bytes.len());
        prop_assert_eq!(BsonDecoder::new().decode(&bytes).unwrap(), fields);
    }

    #[test]
    fn iterator_yields_one_element_per_field(fields in arb_document()) {
        let bytes = BsonEncoder::new().encode(&fields).unwrap();
        let elements = BsonElementIter::new(&bytes)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        prop_assert_eq!(elements.len(), fields.len());
        for (element, (key, value)) in elements.iter().zip(&fields) {
            prop_assert_eq!(element.key(), key.as_str());
            prop_assert_eq!(element.element_type(), value.element_type());
            prop_assert_eq!(
                element.as_bytes().len(),
                1 + key.len() + 1 + element.value_bytes().len()
            );
        }
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let _ = BsonDecoder::new().decode(&bytes);
        if let Ok(iter) = BsonElementIter::new(&bytes) {
            for element in iter {
                if element.is_err() {
                    break;
                }
            }
        }
    }
}
