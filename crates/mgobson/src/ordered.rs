//! Ordered document representation: a sequence of named values.

use std::ops::{Deref, DerefMut};

use mgobson_pack::bson::{BsonDecoder, BsonElementIter, BsonEncodeError, BsonEncoder, BsonError};

use crate::document::{
    decode_element, BsonDocument, DecodeNested, DecodeOptions, DocumentModel, EncodeDocument,
};
use crate::error::Result;
use crate::value::Value;

/// One element of an [`OrderedDocument`].
#[derive(Debug, Clone, PartialEq)]
pub struct DocElem {
    pub name: String,
    pub value: Value,
}

impl DocElem {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A BSON document whose elements keep their order.
///
/// Order matters in some places, for instance index specifications and
/// commands. Duplicate names are legal BSON and are preserved as-is.
///
/// ```
/// use mgobson::{BsonDocument, OrderedDocument};
///
/// let doc = OrderedDocument::new().with("a", 1).with("b", true);
/// let bytes = doc.to_bytes().unwrap();
/// assert_eq!(OrderedDocument::decode(&bytes).unwrap(), doc);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedDocument(pub Vec<DocElem>);

impl OrderedDocument {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends an element and returns the document, for chaining.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.push(DocElem::new(name, value));
    }

    /// Returns the value of the first element called `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|e| e.name == name).map(|e| &e.value)
    }
}

impl Deref for OrderedDocument {
    type Target = Vec<DocElem>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for OrderedDocument {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<DocElem>> for OrderedDocument {
    fn from(elems: Vec<DocElem>) -> Self {
        Self(elems)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for OrderedDocument {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| DocElem::new(k, v)).collect())
    }
}

impl IntoIterator for OrderedDocument {
    type Item = DocElem;
    type IntoIter = std::vec::IntoIter<DocElem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl EncodeDocument for OrderedDocument {
    fn write_document(&self, encoder: &mut BsonEncoder) -> std::result::Result<(), BsonEncodeError> {
        let start = encoder.begin_document();
        for elem in &self.0 {
            elem.value.write_element(encoder, &elem.name)?;
        }
        encoder.end_document(start)
    }
}

impl DecodeNested for OrderedDocument {
    fn decode_at(
        bytes: &[u8],
        decoder: &BsonDecoder,
        depth: usize,
    ) -> std::result::Result<Self, BsonError> {
        decoder.check_depth(depth)?;
        log::trace!("decoding ordered document at depth {depth}");
        let mut elems = Vec::new();
        for element in BsonElementIter::new(bytes)? {
            let element = element?;
            let value = decode_element::<OrderedDocument>(&element, decoder, depth)?;
            elems.push(DocElem {
                name: element.key().to_owned(),
                value,
            });
        }
        Ok(Self(elems))
    }

    fn into_value(self) -> Value {
        Value::Ordered(self)
    }
}

impl BsonDocument for OrderedDocument {
    fn to_document_model(&self) -> Result<DocumentModel> {
        self.0
            .iter()
            .map(|elem| Ok((elem.name.clone(), elem.value.to_bson()?)))
            .collect()
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.encode()?)
    }

    fn from_bytes_with_options(&mut self, bytes: &[u8], options: &DecodeOptions) -> Result<()> {
        let decoded = Self::decode_at(bytes, &options.decoder(), 1).map_err(|e| {
            log::debug!("rejected malformed BSON for an ordered document: {e}");
            e
        })?;
        *self = decoded;
        Ok(())
    }
}
