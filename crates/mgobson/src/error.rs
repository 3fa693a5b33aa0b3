//! Error type shared by the three document representations.

use mgobson_pack::bson::{BsonEncodeError, BsonError};
use thiserror::Error;

/// Errors from encoding or decoding a document.
///
/// Errors raised by the element library are passed through unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A value could not be written as BSON.
    #[error(transparent)]
    Encode(#[from] BsonEncodeError),
    /// The input bytes are not a well-formed BSON document.
    #[error(transparent)]
    Decode(#[from] BsonError),
    /// A value that must be a document was something else.
    #[error("expected a document, got {0}")]
    NotADocument(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
