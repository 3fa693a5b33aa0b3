//! BSON value types.

use super::element_type;

/// BSON ObjectId: 12 opaque bytes whose first four are a big-endian
/// creation timestamp in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BsonObjectId {
    pub bytes: [u8; 12],
}

impl BsonObjectId {
    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        Self { bytes }
    }

    /// Seconds since the Unix epoch encoded in the leading four bytes.
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.bytes[0], self.bytes[1], self.bytes[2], self.bytes[3]])
    }
}

/// BSON DBPointer (deprecated BSON type).
#[derive(Debug, Clone, PartialEq)]
pub struct BsonDbPointer {
    pub name: String,
    pub id: BsonObjectId,
}

/// BSON JavaScript code (without scope).
#[derive(Debug, Clone, PartialEq)]
pub struct BsonJavascriptCode {
    pub code: String,
}

/// BSON Symbol (deprecated BSON type).
#[derive(Debug, Clone, PartialEq)]
pub struct BsonSymbol {
    pub symbol: String,
}

/// BSON JavaScript code with scope (deprecated).
#[derive(Debug, Clone, PartialEq)]
pub struct BsonJavascriptCodeWithScope {
    pub code: String,
    pub scope: Vec<(String, BsonValue)>,
}

/// BSON Timestamp (MongoDB internal replication timestamp).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BsonTimestamp {
    pub increment: u32,
    pub timestamp: u32,
}

/// BSON Decimal128 (16-byte IEEE 754 decimal floating-point), kept opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BsonDecimal128 {
    pub data: Vec<u8>,
}

/// BSON Binary data (subtype + raw bytes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BsonBinary {
    pub subtype: u8,
    pub data: Vec<u8>,
}

/// A BSON value that can appear as a document field value.
#[derive(Debug, Clone, PartialEq)]
pub enum BsonValue {
    /// BSON double (0x01)
    Float(f64),
    /// BSON UTF-8 string (0x02)
    Str(String),
    /// Embedded BSON document (0x03)
    Document(Vec<(String, BsonValue)>),
    /// BSON array (0x04)
    Array(Vec<BsonValue>),
    /// BSON binary data (0x05)
    Binary(BsonBinary),
    /// BSON undefined (deprecated) (0x06)
    Undefined,
    /// BSON ObjectId (0x07)
    ObjectId(BsonObjectId),
    /// BSON boolean (0x08)
    Boolean(bool),
    /// BSON UTC datetime (milliseconds since epoch) (0x09)
    DateTime(i64),
    /// BSON null (0x0a)
    Null,
    /// BSON regular expression: pattern, options (0x0b)
    Regex(String, String),
    /// BSON DBPointer (deprecated) (0x0c)
    DbPointer(BsonDbPointer),
    /// BSON JavaScript code (0x0d)
    JavaScriptCode(BsonJavascriptCode),
    /// BSON Symbol (deprecated) (0x0e)
    Symbol(BsonSymbol),
    /// BSON JavaScript code with scope (deprecated) (0x0f)
    JavaScriptCodeWithScope(BsonJavascriptCodeWithScope),
    /// BSON int32 (0x10)
    Int32(i32),
    /// BSON Timestamp (0x11)
    Timestamp(BsonTimestamp),
    /// BSON int64 (0x12)
    Int64(i64),
    /// BSON Decimal128 (0x13)
    Decimal128(BsonDecimal128),
    /// BSON MinKey (0xFF)
    MinKey,
    /// BSON MaxKey (0x7F)
    MaxKey,
}

impl BsonValue {
    /// The type tag this value is written with.
    pub fn element_type(&self) -> u8 {
        match self {
            BsonValue::Float(_) => element_type::DOUBLE,
            BsonValue::Str(_) => element_type::STRING,
            BsonValue::Document(_) => element_type::EMBEDDED_DOCUMENT,
            BsonValue::Array(_) => element_type::ARRAY,
            BsonValue::Binary(_) => element_type::BINARY,
            BsonValue::Undefined => element_type::UNDEFINED,
            BsonValue::ObjectId(_) => element_type::OBJECT_ID,
            BsonValue::Boolean(_) => element_type::BOOLEAN,
            BsonValue::DateTime(_) => element_type::DATE_TIME,
            BsonValue::Null => element_type::NULL,
            BsonValue::Regex(..) => element_type::REGEX,
            BsonValue::DbPointer(_) => element_type::DB_POINTER,
            BsonValue::JavaScriptCode(_) => element_type::JAVASCRIPT_CODE,
            BsonValue::Symbol(_) => element_type::SYMBOL,
            BsonValue::JavaScriptCodeWithScope(_) => element_type::JAVASCRIPT_CODE_WITH_SCOPE,
            BsonValue::Int32(_) => element_type::INT32,
            BsonValue::Timestamp(_) => element_type::TIMESTAMP,
            BsonValue::Int64(_) => element_type::INT64,
            BsonValue::Decimal128(_) => element_type::DECIMAL128,
            BsonValue::MinKey => element_type::MIN_KEY,
            BsonValue::MaxKey => element_type::MAX_KEY,
        }
    }
}

impl From<f64> for BsonValue {
    fn from(v: f64) -> Self {
        BsonValue::Float(v)
    }
}

impl From<i32> for BsonValue {
    fn from(v: i32) -> Self {
        BsonValue::Int32(v)
    }
}

impl From<i64> for BsonValue {
    fn from(v: i64) -> Self {
        BsonValue::Int64(v)
    }
}

impl From<bool> for BsonValue {
    fn from(v: bool) -> Self {
        BsonValue::Boolean(v)
    }
}

impl From<&str> for BsonValue {
    fn from(v: &str) -> Self {
        BsonValue::Str(v.to_owned())
    }
}

impl From<String> for BsonValue {
    fn from(v: String) -> Self {
        BsonValue::Str(v)
    }
}

impl From<BsonObjectId> for BsonValue {
    fn from(v: BsonObjectId) -> Self {
        BsonValue::ObjectId(v)
    }
}

impl From<BsonBinary> for BsonValue {
    fn from(v: BsonBinary) -> Self {
        BsonValue::Binary(v)
    }
}
