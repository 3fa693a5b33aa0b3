//! BSON element type tags.

pub const DOUBLE: u8 = 0x01;
pub const STRING: u8 = 0x02;
pub const EMBEDDED_DOCUMENT: u8 = 0x03;
pub const ARRAY: u8 = 0x04;
pub const BINARY: u8 = 0x05;
/// Deprecated.
pub const UNDEFINED: u8 = 0x06;
pub const OBJECT_ID: u8 = 0x07;
pub const BOOLEAN: u8 = 0x08;
pub const DATE_TIME: u8 = 0x09;
pub const NULL: u8 = 0x0a;
pub const REGEX: u8 = 0x0b;
/// Deprecated.
pub const DB_POINTER: u8 = 0x0c;
pub const JAVASCRIPT_CODE: u8 = 0x0d;
/// Deprecated.
pub const SYMBOL: u8 = 0x0e;
/// Deprecated.
pub const JAVASCRIPT_CODE_WITH_SCOPE: u8 = 0x0f;
pub const INT32: u8 = 0x10;
pub const TIMESTAMP: u8 = 0x11;
pub const INT64: u8 = 0x12;
pub const DECIMAL128: u8 = 0x13;
pub const MIN_KEY: u8 = 0xff;
pub const MAX_KEY: u8 = 0x7f;

/// Returns `true` for every tag defined by BSON 1.1.
pub fn is_known(tag: u8) -> bool {
    matches!(tag, DOUBLE..=DECIMAL128 | MIN_KEY | MAX_KEY)
}
