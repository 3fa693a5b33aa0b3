//! Unordered document representation backed by a hash map.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use mgobson_pack::bson::{BsonDecoder, BsonElementIter, BsonEncodeError, BsonEncoder, BsonError};

use crate::document::{
    decode_element, BsonDocument, DecodeNested, DecodeOptions, DocumentModel, EncodeDocument,
};
use crate::error::Result;
use crate::value::Value;

/// A BSON document held as a map from key to value.
///
/// Elements are written in the map's iteration order, which is unspecified
/// and may differ between calls. Use [`OrderedDocument`](crate::OrderedDocument)
/// when the byte layout must be stable.
///
/// Nested documents decode as `UnorderedDocument` again, both directly and
/// inside arrays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnorderedDocument(pub HashMap<String, Value>);

impl UnorderedDocument {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Inserts an entry and returns the document, for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }
}

impl Deref for UnorderedDocument {
    type Target = HashMap<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for UnorderedDocument {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<HashMap<String, Value>> for UnorderedDocument {
    fn from(map: HashMap<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for UnorderedDocument {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl EncodeDocument for UnorderedDocument {
    fn write_document(&self, encoder: &mut BsonEncoder) -> std::result::Result<(), BsonEncodeError> {
        let start = encoder.begin_document();
        for (key, value) in &self.0 {
            value.write_element(encoder, key)?;
        }
        encoder.end_document(start)
    }
}

impl DecodeNested for UnorderedDocument {
    fn decode_at(
        bytes: &[u8],
        decoder: &BsonDecoder,
        depth: usize,
    ) -> std::result::Result<Self, BsonError> {
        decoder.check_depth(depth)?;
        log::trace!("decoding unordered document at depth {depth}");
        let mut map = HashMap::new();
        for element in BsonElementIter::new(bytes)? {
            let element = element?;
            let value = decode_element::<UnorderedDocument>(&element, decoder, depth)?;
            // Last occurrence of a duplicate key wins.
            map.insert(element.key().to_owned(), value);
        }
        Ok(Self(map))
    }

    fn into_value(self) -> Value {
        Value::Unordered(self)
    }
}

impl BsonDocument for UnorderedDocument {
    fn to_document_model(&self) -> Result<DocumentModel> {
        self.0
            .iter()
            .map(|(key, value)| Ok((key.clone(), value.to_bson()?)))
            .collect()
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.encode()?)
    }

    fn from_bytes_with_options(&mut self, bytes: &[u8], options: &DecodeOptions) -> Result<()> {
        let decoded = Self::decode_at(bytes, &options.decoder(), 1).map_err(|e| {
            log::debug!("rejected malformed BSON for an unordered document: {e}");
            e
        })?;
        *self = decoded;
        Ok(())
    }
}
