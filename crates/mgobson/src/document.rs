//! The operations every document representation exposes, plus the shared
//! element-decoding rules.

use mgobson_pack::bson::{
    element_type, BsonDecoder, BsonElement, BsonElementIter, BsonEncodeError, BsonEncoder,
    BsonError, BsonValue, DEFAULT_MAX_DEPTH,
};

use crate::error::Result;
use crate::value::Value;

/// The interpreted document model: `(key, value)` pairs in wire order.
pub type DocumentModel = Vec<(String, BsonValue)>;

/// Options for decoding documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum nesting depth. The top-level document is depth 1, and every
    /// embedded document or array adds one.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeOptions {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub(crate) fn decoder(&self) -> BsonDecoder {
        BsonDecoder::with_max_depth(self.max_depth)
    }
}

/// A BSON document representation.
pub trait BsonDocument {
    /// Converts to the interpreted [`DocumentModel`].
    fn to_document_model(&self) -> Result<DocumentModel>;

    /// Like [`to_document_model`](BsonDocument::to_document_model), for
    /// callers that have already guaranteed the document is valid.
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails.
    fn to_document_model_or_panic(&self) -> DocumentModel {
        match self.to_document_model() {
            Ok(model) => model,
            Err(e) => panic!("document model conversion failed: {e}"),
        }
    }

    /// Encodes the document to BSON bytes.
    fn to_bytes(&self) -> Result<Vec<u8>>;

    /// Replaces the contents of `self` with the document decoded from
    /// `bytes`. On error `self` is left untouched.
    fn from_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.from_bytes_with_options(bytes, &DecodeOptions::default())
    }

    fn from_bytes_with_options(&mut self, bytes: &[u8], options: &DecodeOptions) -> Result<()>;

    /// Decodes a fresh document from `bytes`.
    fn decode(bytes: &[u8]) -> Result<Self>
    where
        Self: Sized + Default,
    {
        let mut doc = Self::default();
        doc.from_bytes(bytes)?;
        Ok(doc)
    }
}

/// Streams a whole document (length, elements, terminator) into an encoder.
pub(crate) trait EncodeDocument {
    fn write_document(&self, encoder: &mut BsonEncoder) -> std::result::Result<(), BsonEncodeError>;

    fn encode(&self) -> std::result::Result<Vec<u8>, BsonEncodeError> {
        let mut encoder = BsonEncoder::new();
        self.write_document(&mut encoder)?;
        Ok(encoder.writer.flush())
    }
}

/// A representation that nested documents decode into.
pub(crate) trait DecodeNested: Sized {
    /// Decodes the document in `bytes`, which sits at nesting `depth`.
    fn decode_at(
        bytes: &[u8],
        decoder: &BsonDecoder,
        depth: usize,
    ) -> std::result::Result<Self, BsonError>;

    fn into_value(self) -> Value;
}

/// Decodes one element of a document at `depth`. Embedded documents and
/// documents inside arrays keep the representation `T`.
pub(crate) fn decode_element<T: DecodeNested>(
    element: &BsonElement<'_>,
    decoder: &BsonDecoder,
    depth: usize,
) -> std::result::Result<Value, BsonError> {
    let payload = element.value_bytes();
    match element.element_type() {
        element_type::EMBEDDED_DOCUMENT => {
            Ok(T::decode_at(payload, decoder, depth + 1)?.into_value())
        }
        element_type::ARRAY => decode_slice::<T>(payload, decoder, depth + 1),
        tag => Ok(Value::Scalar(decoder.decode_value_at(tag, payload, depth)?)),
    }
}

fn decode_slice<T: DecodeNested>(
    bytes: &[u8],
    decoder: &BsonDecoder,
    depth: usize,
) -> std::result::Result<Value, BsonError> {
    decoder.check_depth(depth)?;
    let mut items = Vec::new();
    for element in BsonElementIter::new(bytes)? {
        items.push(decode_element::<T>(&element?, decoder, depth)?);
    }
    Ok(Value::Slice(items))
}
