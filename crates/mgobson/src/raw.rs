//! Raw document representation: elements kept as type tag plus
//! uninterpreted payload bytes.
//!
//! This is useful when processing documents lazily, or when forwarding
//! content that should not be re-encoded. See <http://bsonspec.org/spec.html>
//! for the payload layout of each type.

use std::ops::{Deref, DerefMut};

use mgobson_pack::bson::{BsonDecoder, BsonElementIter, BsonEncodeError, BsonEncoder, BsonValue};

use crate::document::{BsonDocument, DecodeOptions, DocumentModel, EncodeDocument};
use crate::error::Result;

/// An element value kept as its BSON type tag and raw payload.
///
/// `data` excludes the tag and the element name. It is copied verbatim in
/// both directions and never validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawElement {
    pub kind: u8,
    pub data: Vec<u8>,
}

impl RawElement {
    pub fn new(kind: u8, data: impl Into<Vec<u8>>) -> Self {
        Self {
            kind,
            data: data.into(),
        }
    }

    /// Interprets the payload.
    pub fn value(&self) -> Result<BsonValue> {
        Ok(BsonDecoder::new().decode_value(self.kind, &self.data)?)
    }
}

/// One element of a [`RawDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocElem {
    pub name: String,
    pub value: RawElement,
}

/// A BSON document whose elements are kept unprocessed, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDocument(pub Vec<RawDocElem>);

impl RawDocument {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends an element and returns the document, for chaining.
    pub fn with(mut self, name: impl Into<String>, kind: u8, data: impl Into<Vec<u8>>) -> Self {
        self.push(name, kind, data);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, kind: u8, data: impl Into<Vec<u8>>) {
        self.0.push(RawDocElem {
            name: name.into(),
            value: RawElement::new(kind, data),
        });
    }

    /// Returns the first element called `name`.
    pub fn get(&self, name: &str) -> Option<&RawElement> {
        self.0.iter().find(|e| e.name == name).map(|e| &e.value)
    }
}

impl Deref for RawDocument {
    type Target = Vec<RawDocElem>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for RawDocument {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<RawDocElem>> for RawDocument {
    fn from(elems: Vec<RawDocElem>) -> Self {
        Self(elems)
    }
}

impl EncodeDocument for RawDocument {
    fn write_document(&self, encoder: &mut BsonEncoder) -> std::result::Result<(), BsonEncodeError> {
        let start = encoder.begin_document();
        for elem in &self.0 {
            encoder.write_raw_element(elem.value.kind, &elem.name, &elem.value.data)?;
        }
        encoder.end_document(start)
    }
}

impl BsonDocument for RawDocument {
    /// Encodes the raw elements and interprets the result, so this fails
    /// when a payload is malformed.
    fn to_document_model(&self) -> Result<DocumentModel> {
        let bytes = self.encode()?;
        Ok(BsonDecoder::new().decode(&bytes)?)
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.encode()?)
    }

    /// Captures every element's tag and payload. Nested documents are not
    /// descended into, so `max_depth` has no effect here.
    fn from_bytes_with_options(&mut self, bytes: &[u8], _options: &DecodeOptions) -> Result<()> {
        let mut elems = Vec::new();
        let iter = BsonElementIter::new(bytes).map_err(|e| {
            log::debug!("rejected malformed BSON for a raw document: {e}");
            e
        })?;
        for element in iter {
            let element = element.map_err(|e| {
                log::debug!("rejected malformed BSON element for a raw document: {e}");
                e
            })?;
            elems.push(RawDocElem {
                name: element.key().to_owned(),
                value: RawElement::new(element.element_type(), element.value_bytes()),
            });
        }
        *self = Self(elems);
        Ok(())
    }
}
