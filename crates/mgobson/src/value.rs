//! Field values held by ordered and unordered documents.

use mgobson_pack::bson::{element_type, BsonEncodeError, BsonEncoder, BsonValue};

use crate::document::{BsonDocument, EncodeDocument};
use crate::error::Result;
use crate::ordered::OrderedDocument;
use crate::raw::RawDocument;
use crate::unordered::UnorderedDocument;

/// A document field value.
///
/// The variant decides how the value is written: nested documents are
/// encoded by their own representation, slices become BSON arrays, and
/// scalars go through the generic element encoder.
///
/// `Scalar` is meant for non-container values. Build values with
/// [`Value::from`], which turns a [`BsonValue::Document`] or
/// [`BsonValue::Array`] into `Ordered` or `Slice`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(BsonValue),
    Ordered(OrderedDocument),
    Unordered(UnorderedDocument),
    Raw(RawDocument),
    Slice(Vec<Value>),
}

impl Value {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Ordered(_) => "ordered document",
            Value::Unordered(_) => "unordered document",
            Value::Raw(_) => "raw document",
            Value::Slice(_) => "slice",
        }
    }

    pub fn as_scalar(&self) -> Option<&BsonValue> {
        match self {
            Value::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_ordered(&self) -> Option<&OrderedDocument> {
        match self {
            Value::Ordered(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_unordered(&self) -> Option<&UnorderedDocument> {
        match self {
            Value::Unordered(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> Option<&RawDocument> {
        match self {
            Value::Raw(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Value::Slice(items) => Some(items),
            _ => None,
        }
    }

    /// Converts to the element library's value model. Nested documents of
    /// any representation become [`BsonValue::Document`].
    pub fn to_bson(&self) -> Result<BsonValue> {
        Ok(match self {
            Value::Scalar(v) => v.clone(),
            Value::Ordered(d) => BsonValue::Document(d.to_document_model()?),
            Value::Unordered(m) => BsonValue::Document(m.to_document_model()?),
            Value::Raw(r) => BsonValue::Document(r.to_document_model()?),
            Value::Slice(items) => BsonValue::Array(
                items
                    .iter()
                    .map(Value::to_bson)
                    .collect::<Result<Vec<_>>>()?,
            ),
        })
    }

    /// Appends this value as element `key` of the document being encoded.
    pub(crate) fn write_element(
        &self,
        encoder: &mut BsonEncoder,
        key: &str,
    ) -> std::result::Result<(), BsonEncodeError> {
        match self {
            Value::Scalar(v) => encoder.write_element(key, v),
            Value::Ordered(d) => write_sub_document(encoder, key, d),
            Value::Unordered(m) => write_sub_document(encoder, key, m),
            Value::Raw(r) => write_sub_document(encoder, key, r),
            Value::Slice(items) => {
                encoder.write_element_header(element_type::ARRAY, key)?;
                let start = encoder.begin_document();
                for (i, item) in items.iter().enumerate() {
                    item.write_element(encoder, &i.to_string())?;
                }
                encoder.end_document(start)
            }
        }
    }
}

fn write_sub_document<T: EncodeDocument>(
    encoder: &mut BsonEncoder,
    key: &str,
    doc: &T,
) -> std::result::Result<(), BsonEncodeError> {
    encoder.write_element_header(element_type::EMBEDDED_DOCUMENT, key)?;
    doc.write_document(encoder)
}

/// Documents become [`Value::Ordered`] and arrays [`Value::Slice`], at every
/// level, matching what decoding an ordered document produces.
impl From<BsonValue> for Value {
    fn from(v: BsonValue) -> Self {
        match v {
            BsonValue::Document(fields) => Value::Ordered(fields.into_iter().collect()),
            BsonValue::Array(items) => Value::Slice(items.into_iter().map(Value::from).collect()),
            other => Value::Scalar(other),
        }
    }
}

impl From<OrderedDocument> for Value {
    fn from(v: OrderedDocument) -> Self {
        Value::Ordered(v)
    }
}

impl From<UnorderedDocument> for Value {
    fn from(v: UnorderedDocument) -> Self {
        Value::Unordered(v)
    }
}

impl From<RawDocument> for Value {
    fn from(v: RawDocument) -> Self {
        Value::Raw(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Slice(v)
    }
}

macro_rules! scalar_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Scalar(BsonValue::from(v))
                }
            }
        )*
    };
}

scalar_from!(i32, i64, f64, bool, &str, String);
