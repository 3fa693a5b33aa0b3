//! BSON codec error types.

use mgobson_buffers::BufferError;
use thiserror::Error;

/// Error type for BSON decoding operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BsonError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid document length: {0}")]
    InvalidDocumentLength(i32),
    #[error("document is missing its 0x00 terminator")]
    MissingTerminator,
    #[error("unterminated element name")]
    UnterminatedCString,
    #[error("unsupported BSON element type: 0x{0:02x}")]
    UnsupportedType(u8),
    #[error("invalid UTF-8")]
    InvalidUtf8,
    #[error("invalid string length: {0}")]
    InvalidStringLength(i32),
    #[error("invalid binary length: {0}")]
    InvalidBinaryLength(i32),
    #[error("invalid boolean byte: 0x{0:02x}")]
    InvalidBoolean(u8),
    #[error("document nesting exceeds the maximum depth of {0}")]
    NestingTooDeep(usize),
}

impl From<BufferError> for BsonError {
    fn from(e: BufferError) -> Self {
        match e {
            BufferError::EndOfBuffer => BsonError::UnexpectedEof,
            BufferError::InvalidUtf8 => BsonError::InvalidUtf8,
            BufferError::UnterminatedCString => BsonError::UnterminatedCString,
        }
    }
}

/// Error type for BSON encoding operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BsonEncodeError {
    #[error("key {0:?} contains an interior NUL byte")]
    KeyContainsNul(String),
    #[error("regex pattern or flags {0:?} contain an interior NUL byte")]
    CStringContainsNul(String),
    #[error("Decimal128 must be 16 bytes, got {0}")]
    InvalidDecimal128Length(usize),
    #[error("encoded size {0} exceeds the BSON limit of i32::MAX")]
    DocumentTooLarge(usize),
}
