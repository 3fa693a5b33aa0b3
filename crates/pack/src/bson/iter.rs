//! Streaming iterator over the elements of a BSON document buffer.
//!
//! The iterator validates the document frame (length prefix, terminator)
//! up front and then walks elements one at a time. For every element it
//! reports the exact byte span of the payload, so callers can keep payloads
//! verbatim without interpreting them.

use mgobson_buffers::Reader;

use super::decoder::BsonDecoder;
use super::element_type as t;
use super::error::BsonError;
use super::values::BsonValue;

/// Smallest legal document: length prefix plus terminator.
const MIN_DOCUMENT_LEN: i32 = 5;

/// Smallest legal code-with-scope payload: length, empty string, empty document.
const MIN_CODE_WITH_SCOPE_LEN: i32 = 4 + 5 + 5;

/// Validates the frame of a BSON document and returns its declared length.
///
/// Bytes past the declared length are not part of the document and are
/// ignored.
pub fn document_len(buf: &[u8]) -> Result<usize, BsonError> {
    let declared = Reader::new(buf).try_i32()?;
    if declared < MIN_DOCUMENT_LEN {
        return Err(BsonError::InvalidDocumentLength(declared));
    }
    let len = declared as usize;
    if len > buf.len() {
        return Err(BsonError::UnexpectedEof);
    }
    if buf[len - 1] != 0 {
        return Err(BsonError::MissingTerminator);
    }
    Ok(len)
}

/// One element of a document, borrowed from the document buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BsonElement<'a> {
    key: &'a str,
    element_type: u8,
    bytes: &'a [u8],
    value_offset: usize,
}

impl<'a> BsonElement<'a> {
    pub fn key(&self) -> &'a str {
        self.key
    }

    pub fn element_type(&self) -> u8 {
        self.element_type
    }

    /// The payload only: everything after the type tag and the
    /// NUL-terminated key.
    pub fn value_bytes(&self) -> &'a [u8] {
        &self.bytes[self.value_offset..]
    }

    /// The whole element as it appears on the wire: `[tag][key][0x00][payload]`.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Interprets the payload with a default [`BsonDecoder`].
    pub fn value(&self) -> Result<BsonValue, BsonError> {
        BsonDecoder::new().decode_value(self.element_type, self.value_bytes())
    }
}

/// Iterator over the elements of one document. Nested documents are not
/// descended into; their bytes are reported as the element payload.
///
/// Yields `Err` at most once and then stops.
#[derive(Debug, Clone)]
pub struct BsonElementIter<'a> {
    reader: Reader<'a>,
    declared: i32,
    done: bool,
}

impl<'a> BsonElementIter<'a> {
    pub fn new(doc: &'a [u8]) -> Result<Self, BsonError> {
        let len = document_len(doc)?;
        Ok(Self {
            // The terminator is excluded from the element region.
            reader: Reader::from_slice(doc, 4, len - 1),
            declared: len as i32,
            done: false,
        })
    }

    fn read_element(&mut self) -> Result<BsonElement<'a>, BsonError> {
        let start = self.reader.x;
        let tag = self.reader.try_u8()?;
        if tag == 0 {
            // A terminator before the declared end.
            return Err(BsonError::InvalidDocumentLength(self.declared));
        }
        let key = self.reader.try_cstr()?;
        if !t::is_known(tag) {
            return Err(BsonError::UnsupportedType(tag));
        }
        let value_offset = self.reader.x - start;
        let len = payload_len(tag, &self.reader)?;
        self.reader.try_skip(len)?;
        let buf: &'a [u8] = self.reader.uint8;
        Ok(BsonElement {
            key,
            element_type: tag,
            bytes: &buf[start..self.reader.x],
            value_offset,
        })
    }
}

impl<'a> Iterator for BsonElementIter<'a> {
    type Item = Result<BsonElement<'a>, BsonError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.reader.size() == 0 {
            self.done = true;
            return None;
        }
        let res = self.read_element();
        if res.is_err() {
            self.done = true;
        }
        Some(res)
    }
}

impl std::iter::FusedIterator for BsonElementIter<'_> {}

/// Computes the payload length of an element whose payload starts at the
/// reader's cursor. The reader itself is not advanced.
fn payload_len(tag: u8, reader: &Reader<'_>) -> Result<usize, BsonError> {
    let mut r = reader.clone();
    let len = match tag {
        t::DOUBLE | t::DATE_TIME | t::TIMESTAMP | t::INT64 => 8,
        t::INT32 => 4,
        t::BOOLEAN => 1,
        t::OBJECT_ID => 12,
        t::DECIMAL128 => 16,
        t::UNDEFINED | t::NULL | t::MIN_KEY | t::MAX_KEY => 0,
        t::STRING | t::JAVASCRIPT_CODE | t::SYMBOL => string_len(&mut r)?,
        t::DB_POINTER => string_len(&mut r)? + 12,
        t::EMBEDDED_DOCUMENT | t::ARRAY => {
            let n = r.try_i32()?;
            if n < MIN_DOCUMENT_LEN {
                return Err(BsonError::InvalidDocumentLength(n));
            }
            n as usize
        }
        t::BINARY => {
            let n = r.try_i32()?;
            if n < 0 {
                return Err(BsonError::InvalidBinaryLength(n));
            }
            // length, subtype, data
            4 + 1 + n as usize
        }
        t::REGEX => {
            r.try_cstr()?;
            r.try_cstr()?;
            r.x - reader.x
        }
        t::JAVASCRIPT_CODE_WITH_SCOPE => {
            let n = r.try_i32()?;
            if n < MIN_CODE_WITH_SCOPE_LEN {
                return Err(BsonError::InvalidDocumentLength(n));
            }
            n as usize
        }
        other => return Err(BsonError::UnsupportedType(other)),
    };
    Ok(len)
}

/// Length of a BSON string payload including its length prefix.
fn string_len(r: &mut Reader<'_>) -> Result<usize, BsonError> {
    let n = r.try_i32()?;
    if n < 1 {
        return Err(BsonError::InvalidStringLength(n));
    }
    Ok(4 + n as usize)
}
