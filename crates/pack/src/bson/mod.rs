//! BSON (Binary JSON) encoding and decoding.
//!
//! Wire layout (all integers little-endian):
//!
//! ```text
//! document := int32 total_length, element*, 0x00
//! element  := u8 type_tag, cstring name, payload
//! ```

pub mod decoder;
pub mod element_type;
pub mod encoder;
pub mod error;
pub mod iter;
pub mod values;

pub use decoder::{BsonDecoder, DEFAULT_MAX_DEPTH};
pub use encoder::BsonEncoder;
pub use error::{BsonEncodeError, BsonError};
pub use iter::{BsonElement, BsonElementIter};
pub use values::{
    BsonBinary, BsonDbPointer, BsonDecimal128, BsonJavascriptCode, BsonJavascriptCodeWithScope,
    BsonObjectId, BsonSymbol, BsonTimestamp, BsonValue,
};

/// The empty document: a length prefix of 5 followed by the terminator.
pub const EMPTY_DOCUMENT: [u8; 5] = [0x05, 0x00, 0x00, 0x00, 0x00];
