//! BSON document decoder.
//!
//! Documents are walked with [`BsonElementIter`], so framing errors are
//! reported the same way as for raw iteration. Payloads are then
//! interpreted into [`BsonValue`]s.

use mgobson_buffers::Reader;

use super::element_type as t;
use super::error::BsonError;
use super::iter::{document_len, BsonElementIter};
use super::values::{
    BsonBinary, BsonDbPointer, BsonDecimal128, BsonJavascriptCode, BsonJavascriptCodeWithScope,
    BsonObjectId, BsonSymbol, BsonTimestamp, BsonValue,
};

/// Default limit on document nesting. The top-level document is depth 1.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// BSON document decoder.
#[derive(Debug, Clone, Copy)]
pub struct BsonDecoder {
    max_depth: usize,
}

impl Default for BsonDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl BsonDecoder {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Decodes a BSON document from bytes, returning an error on malformed input.
    pub fn decode(&self, data: &[u8]) -> Result<Vec<(String, BsonValue)>, BsonError> {
        self.read_document(data, 1)
    }

    /// Interprets a single element payload found in a top-level document.
    pub fn decode_value(&self, element_type: u8, payload: &[u8]) -> Result<BsonValue, BsonError> {
        self.decode_value_at(element_type, payload, 1)
    }

    /// Interprets a single element payload found in a document at `depth`.
    /// Sub-documents inside the payload count from `depth + 1`.
    pub fn decode_value_at(
        &self,
        element_type: u8,
        payload: &[u8],
        depth: usize,
    ) -> Result<BsonValue, BsonError> {
        let mut r = Reader::new(payload);
        self.read_element_value(element_type, &mut r, depth)
    }

    /// Fails when a document at `depth` would exceed the configured limit.
    pub fn check_depth(&self, depth: usize) -> Result<(), BsonError> {
        if depth > self.max_depth {
            log::debug!("rejecting BSON nested deeper than {}", self.max_depth);
            return Err(BsonError::NestingTooDeep(self.max_depth));
        }
        Ok(())
    }

    fn read_document(
        &self,
        data: &[u8],
        depth: usize,
    ) -> Result<Vec<(String, BsonValue)>, BsonError> {
        self.check_depth(depth)?;
        let mut fields = Vec::new();
        for element in BsonElementIter::new(data)? {
            let element = element?;
            let value =
                self.decode_value_at(element.element_type(), element.value_bytes(), depth)?;
            fields.push((element.key().to_owned(), value));
        }
        Ok(fields)
    }

    fn read_element_value(
        &self,
        typ: u8,
        r: &mut Reader<'_>,
        depth: usize,
    ) -> Result<BsonValue, BsonError> {
        match typ {
            t::DOUBLE => Ok(BsonValue::Float(r.try_f64()?)),
            t::STRING => Ok(BsonValue::Str(read_string(r)?)),
            t::EMBEDDED_DOCUMENT => Ok(BsonValue::Document(
                self.read_document(rest(r), depth + 1)?,
            )),
            t::ARRAY => Ok(BsonValue::Array(
                self.read_document(rest(r), depth + 1)?
                    .into_iter()
                    .map(|(_, v)| v)
                    .collect(),
            )),
            t::BINARY => {
                let length = r.try_i32()?;
                if length < 0 {
                    return Err(BsonError::InvalidBinaryLength(length));
                }
                let subtype = r.try_u8()?;
                let data = r.try_buf(length as usize)?.to_vec();
                Ok(BsonValue::Binary(BsonBinary { subtype, data }))
            }
            t::UNDEFINED => Ok(BsonValue::Undefined),
            t::OBJECT_ID => Ok(BsonValue::ObjectId(read_object_id(r)?)),
            t::BOOLEAN => match r.try_u8()? {
                0 => Ok(BsonValue::Boolean(false)),
                1 => Ok(BsonValue::Boolean(true)),
                b => Err(BsonError::InvalidBoolean(b)),
            },
            t::DATE_TIME => Ok(BsonValue::DateTime(r.try_i64()?)),
            t::NULL => Ok(BsonValue::Null),
            t::REGEX => {
                let pattern = r.try_cstr()?.to_owned();
                let flags = r.try_cstr()?.to_owned();
                Ok(BsonValue::Regex(pattern, flags))
            }
            t::DB_POINTER => {
                let name = read_string(r)?;
                let id = read_object_id(r)?;
                Ok(BsonValue::DbPointer(BsonDbPointer { name, id }))
            }
            t::JAVASCRIPT_CODE => Ok(BsonValue::JavaScriptCode(BsonJavascriptCode {
                code: read_string(r)?,
            })),
            t::SYMBOL => Ok(BsonValue::Symbol(BsonSymbol {
                symbol: read_string(r)?,
            })),
            t::JAVASCRIPT_CODE_WITH_SCOPE => {
                let total_len = r.try_i32()?;
                let code = read_string(r)?;
                // The scope must fill the payload exactly, and the declared
                // total must cover the length field, the string and the scope.
                let scope_bytes = rest(r);
                let scope_len = document_len(scope_bytes)?;
                let expected = 4 + (4 + code.len() + 1) + scope_len;
                if scope_len != scope_bytes.len() || usize::try_from(total_len) != Ok(expected) {
                    return Err(BsonError::InvalidDocumentLength(total_len));
                }
                let scope = self.read_document(scope_bytes, depth + 1)?;
                Ok(BsonValue::JavaScriptCodeWithScope(
                    BsonJavascriptCodeWithScope { code, scope },
                ))
            }
            t::INT32 => Ok(BsonValue::Int32(r.try_i32()?)),
            t::TIMESTAMP => {
                let increment = r.try_u32()?;
                let timestamp = r.try_u32()?;
                Ok(BsonValue::Timestamp(BsonTimestamp {
                    increment,
                    timestamp,
                }))
            }
            t::INT64 => Ok(BsonValue::Int64(r.try_i64()?)),
            t::DECIMAL128 => Ok(BsonValue::Decimal128(BsonDecimal128 {
                data: r.try_buf(16)?.to_vec(),
            })),
            t::MIN_KEY => Ok(BsonValue::MinKey),
            t::MAX_KEY => Ok(BsonValue::MaxKey),
            other => Err(BsonError::UnsupportedType(other)),
        }
    }
}

/// The unread remainder of the reader's window.
fn rest<'a>(r: &Reader<'a>) -> &'a [u8] {
    let buf: &'a [u8] = r.uint8;
    &buf[r.x..r.end]
}

/// Reads a BSON string: little-endian i32 (byte_count+1) + UTF-8 bytes + null byte.
fn read_string(r: &mut Reader<'_>) -> Result<String, BsonError> {
    let length = r.try_i32()?;
    if length < 1 {
        return Err(BsonError::InvalidStringLength(length));
    }
    let s = r.try_utf8(length as usize - 1)?.to_owned();
    if r.try_u8()? != 0 {
        return Err(BsonError::InvalidStringLength(length));
    }
    Ok(s)
}

fn read_object_id(r: &mut Reader<'_>) -> Result<BsonObjectId, BsonError> {
    Ok(BsonObjectId::from_bytes(r.try_array::<12>()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bson::BsonEncoder;

    fn nested(depth: usize) -> Vec<(String, BsonValue)> {
        let mut doc = vec![];
        for _ in 1..depth {
            doc = vec![("a".to_string(), BsonValue::Document(doc))];
        }
        doc
    }

    #[test]
    fn decodes_simple_document() {
        let data = [
            0x14, 0, 0, 0, //
            0x10, b'f', b'o', b'o', 0, 1, 0, 0, 0, //
            0x08, b'b', b'a', b'r', 0, 0, //
            0,
        ];
        let fields = BsonDecoder::new().decode(&data).unwrap();
        assert_eq!(
            fields,
            vec![
                ("foo".to_string(), BsonValue::Int32(1)),
                ("bar".to_string(), BsonValue::Boolean(false)),
            ]
        );
    }

    #[test]
    fn all_types_survive_a_round_trip() {
        let mut oid = [0u8; 12];
        oid[11] = 7;
        let fields = vec![
            ("f".to_string(), BsonValue::Float(2.5)),
            ("s".to_string(), BsonValue::Str("héllo".to_string())),
            (
                "d".to_string(),
                BsonValue::Document(vec![("x".to_string(), BsonValue::Null)]),
            ),
            (
                "a".to_string(),
                BsonValue::Array(vec![BsonValue::Int64(-1), BsonValue::Str("y".into())]),
            ),
            (
                "b".to_string(),
                BsonValue::Binary(BsonBinary {
                    subtype: 4,
                    data: vec![1, 2, 3],
                }),
            ),
            ("u".to_string(), BsonValue::Undefined),
            (
                "o".to_string(),
                BsonValue::ObjectId(BsonObjectId::from_bytes(oid)),
            ),
            ("t".to_string(), BsonValue::Boolean(true)),
            ("dt".to_string(), BsonValue::DateTime(1_500_000_000_000)),
            ("re".to_string(), BsonValue::Regex("^a".into(), "i".into())),
            (
                "p".to_string(),
                BsonValue::DbPointer(BsonDbPointer {
                    name: "coll".into(),
                    id: BsonObjectId::from_bytes(oid),
                }),
            ),
            (
                "js".to_string(),
                BsonValue::JavaScriptCode(BsonJavascriptCode { code: "1".into() }),
            ),
            (
                "sym".to_string(),
                BsonValue::Symbol(BsonSymbol { symbol: "s".into() }),
            ),
            (
                "jss".to_string(),
                BsonValue::JavaScriptCodeWithScope(BsonJavascriptCodeWithScope {
                    code: "x".into(),
                    scope: vec![("x".to_string(), BsonValue::Int32(1))],
                }),
            ),
            ("i".to_string(), BsonValue::Int32(i32::MIN)),
            (
                "ts".to_string(),
                BsonValue::Timestamp(BsonTimestamp {
                    increment: 1,
                    timestamp: u32::MAX,
                }),
            ),
            ("l".to_string(), BsonValue::Int64(i64::MAX)),
            (
                "dec".to_string(),
                BsonValue::Decimal128(BsonDecimal128 { data: vec![9; 16] }),
            ),
            ("min".to_string(), BsonValue::MinKey),
            ("max".to_string(), BsonValue::MaxKey),
        ];
        let bytes = BsonEncoder::new().encode(&fields).unwrap();
        assert_eq!(BsonDecoder::new().decode(&bytes).unwrap(), fields);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let data = [8, 0, 0, 0, 0x20, b'a', 0, 0];
        assert_eq!(
            BsonDecoder::new().decode(&data),
            Err(BsonError::UnsupportedType(0x20))
        );
    }

    #[test]
    fn invalid_boolean_is_rejected() {
        let data = [9, 0, 0, 0, 0x08, b'a', 0, 2, 0];
        assert_eq!(
            BsonDecoder::new().decode(&data),
            Err(BsonError::InvalidBoolean(2))
        );
    }

    #[test]
    fn string_without_terminator_is_rejected() {
        // "ab" declared with length 3 but the last byte is not NUL.
        let data = [
            15, 0, 0, 0, 0x02, b's', 0, 3, 0, 0, 0, b'a', b'b', b'c', 0,
        ];
        assert_eq!(
            BsonDecoder::new().decode(&data),
            Err(BsonError::InvalidStringLength(3))
        );
    }

    #[test]
    fn code_with_scope_with_trailing_junk_is_rejected() {
        // Declared total 20, but string plus scope only account for 15.
        let data = [
            28, 0, 0, 0, 0x0f, b'c', 0, //
            20, 0, 0, 0, 2, 0, 0, 0, b'x', 0, 5, 0, 0, 0, 0, //
            0xaa, 0xaa, 0xaa, 0xaa, 0xaa, //
            0,
        ];
        assert_eq!(
            BsonDecoder::new().decode(&data),
            Err(BsonError::InvalidDocumentLength(20))
        );
    }

    #[test]
    fn code_with_scope_total_must_match_contents() {
        let payload = [99, 0, 0, 0, 2, 0, 0, 0, b'x', 0, 5, 0, 0, 0, 0];
        assert_eq!(
            BsonDecoder::new().decode_value(t::JAVASCRIPT_CODE_WITH_SCOPE, &payload),
            Err(BsonError::InvalidDocumentLength(99))
        );

        let mut consistent = payload;
        consistent[0] = 15;
        assert_eq!(
            BsonDecoder::new().decode_value(t::JAVASCRIPT_CODE_WITH_SCOPE, &consistent),
            Ok(BsonValue::JavaScriptCodeWithScope(BsonJavascriptCodeWithScope {
                code: "x".to_string(),
                scope: vec![],
            }))
        );
    }

    #[test]
    fn depth_limit_is_enforced() {
        let bytes = BsonEncoder::new().encode(&nested(4)).unwrap();
        assert!(BsonDecoder::with_max_depth(4).decode(&bytes).is_ok());
        assert_eq!(
            BsonDecoder::with_max_depth(3).decode(&bytes),
            Err(BsonError::NestingTooDeep(3))
        );
    }
}
