//! mgobson-buffers - byte buffer primitives for the BSON codecs.
//!
//! BSON is little-endian throughout, so every multi-byte accessor in this
//! crate reads and writes little-endian values.

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

use thiserror::Error;

/// Error returned by the bounds-checked [`Reader`] accessors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    #[error("invalid UTF-8")]
    InvalidUtf8,
    #[error("unterminated C string")]
    UnterminatedCString,
}
