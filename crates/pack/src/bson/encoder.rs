//! BSON document encoder.
//!
//! BSON is a little-endian binary format. All multi-byte integers are
//! written in little-endian byte order.

use mgobson_buffers::Writer;

use super::element_type;
use super::error::BsonEncodeError;
use super::values::BsonValue;

/// Encodes BSON documents into an internal [`Writer`].
///
/// Besides the one-shot [`BsonEncoder::encode`], the encoder exposes the
/// building blocks callers need to stream their own document shapes:
/// [`begin_document`](BsonEncoder::begin_document) /
/// [`end_document`](BsonEncoder::end_document) bracket a document and
/// backfill its length, and the `write_*_element` methods append elements.
pub struct BsonEncoder {
    pub writer: Writer,
}

impl Default for BsonEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl BsonEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    /// Encodes a BSON document to bytes.
    pub fn encode(&mut self, fields: &[(String, BsonValue)]) -> Result<Vec<u8>, BsonEncodeError> {
        self.writer.reset();
        match self.write_document(fields) {
            Ok(()) => Ok(self.writer.flush()),
            Err(e) => {
                self.writer.reset();
                Err(e)
            }
        }
    }

    /// Starts a document by reserving its length prefix. Returns the offset
    /// to pass to [`BsonEncoder::end_document`].
    pub fn begin_document(&mut self) -> usize {
        self.writer.reserve_i32()
    }

    /// Writes the terminating null byte and backfills the length prefix.
    pub fn end_document(&mut self, start: usize) -> Result<(), BsonEncodeError> {
        self.writer.u8(0);
        self.backfill_length(start)
    }

    fn backfill_length(&mut self, start: usize) -> Result<(), BsonEncodeError> {
        let size = self.writer.len() - start;
        let size = i32::try_from(size).map_err(|_| BsonEncodeError::DocumentTooLarge(size))?;
        self.writer.patch_i32(start, size);
        Ok(())
    }

    pub fn write_document(&mut self, fields: &[(String, BsonValue)]) -> Result<(), BsonEncodeError> {
        let start = self.begin_document();
        for (key, value) in fields {
            self.write_element(key, value)?;
        }
        self.end_document(start)
    }

    /// Writes an array as a document keyed `"0"`, `"1"`, ...
    pub fn write_array(&mut self, items: &[BsonValue]) -> Result<(), BsonEncodeError> {
        let start = self.begin_document();
        for (i, item) in items.iter().enumerate() {
            self.write_element(&i.to_string(), item)?;
        }
        self.end_document(start)
    }

    /// Writes the type tag and the key of an element.
    pub fn write_element_header(&mut self, tag: u8, key: &str) -> Result<(), BsonEncodeError> {
        if key.as_bytes().contains(&0) {
            return Err(BsonEncodeError::KeyContainsNul(key.to_owned()));
        }
        self.writer.u8(tag);
        self.writer.cstr(key);
        Ok(())
    }

    /// Writes an element whose payload is already encoded. The payload is
    /// copied verbatim.
    pub fn write_raw_element(
        &mut self,
        tag: u8,
        key: &str,
        payload: &[u8],
    ) -> Result<(), BsonEncodeError> {
        self.write_element_header(tag, key)?;
        self.writer.buf(payload);
        Ok(())
    }

    pub fn write_element(&mut self, key: &str, value: &BsonValue) -> Result<(), BsonEncodeError> {
        self.write_element_header(value.element_type(), key)?;
        match value {
            BsonValue::Float(f) => self.writer.f64(*f),
            BsonValue::Str(s) => self.write_string(s)?,
            BsonValue::Document(fields) => self.write_document(fields)?,
            BsonValue::Array(arr) => self.write_array(arr)?,
            BsonValue::Binary(bin) => {
                let len = i32::try_from(bin.data.len())
                    .map_err(|_| BsonEncodeError::DocumentTooLarge(bin.data.len()))?;
                self.writer.i32(len);
                self.writer.u8(bin.subtype);
                self.writer.buf(&bin.data);
            }
            BsonValue::Undefined | BsonValue::Null | BsonValue::MinKey | BsonValue::MaxKey => {}
            BsonValue::ObjectId(id) => self.writer.buf(&id.bytes),
            BsonValue::Boolean(b) => self.writer.u8(u8::from(*b)),
            BsonValue::DateTime(ms) => self.writer.i64(*ms),
            BsonValue::Regex(pattern, flags) => {
                self.write_cstring(pattern)?;
                self.write_cstring(flags)?;
            }
            BsonValue::DbPointer(ptr) => {
                self.write_string(&ptr.name)?;
                self.writer.buf(&ptr.id.bytes);
            }
            BsonValue::JavaScriptCode(jsc) => self.write_string(&jsc.code)?,
            BsonValue::Symbol(sym) => self.write_string(&sym.symbol)?,
            BsonValue::JavaScriptCodeWithScope(jscws) => {
                // int32 total length, string code, document scope
                let start = self.writer.reserve_i32();
                self.write_string(&jscws.code)?;
                self.write_document(&jscws.scope)?;
                self.backfill_length(start)?;
            }
            BsonValue::Int32(i) => self.writer.i32(*i),
            BsonValue::Timestamp(ts) => {
                self.writer.u32(ts.increment);
                self.writer.u32(ts.timestamp);
            }
            BsonValue::Int64(i) => self.writer.i64(*i),
            BsonValue::Decimal128(dec) => {
                if dec.data.len() != 16 {
                    return Err(BsonEncodeError::InvalidDecimal128Length(dec.data.len()));
                }
                self.writer.buf(&dec.data);
            }
        }
        Ok(())
    }

    /// Writes a null-terminated C-string, rejecting interior NULs.
    fn write_cstring(&mut self, s: &str) -> Result<(), BsonEncodeError> {
        if s.as_bytes().contains(&0) {
            return Err(BsonEncodeError::CStringContainsNul(s.to_owned()));
        }
        self.writer.cstr(s);
        Ok(())
    }

    /// Writes a BSON string: little-endian i32 (byte_count+1) + UTF-8 bytes + null byte.
    fn write_string(&mut self, s: &str) -> Result<(), BsonEncodeError> {
        let len = i32::try_from(s.len() + 1)
            .map_err(|_| BsonEncodeError::DocumentTooLarge(s.len()))?;
        self.writer.i32(len);
        self.writer.cstr(s);
        Ok(())
    }
}
