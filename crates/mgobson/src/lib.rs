//! Three in-memory representations of BSON documents that convert to and
//! from the BSON wire format:
//!
//! - [`UnorderedDocument`] (`M`): a hash map, element order unspecified.
//! - [`OrderedDocument`] (`D`): a sequence of named values, order preserved.
//! - [`RawDocument`] (`RawD`): a sequence of named raw elements whose
//!   payloads are kept as uninterpreted bytes.
//!
//! All three implement [`BsonDocument`].
//!
//! ```
//! use mgobson::{BsonDocument, M, Value};
//!
//! let m = M::new().with("foo", 1).with("bar", false);
//! let bytes = m.to_bytes().unwrap();
//! assert_eq!(bytes.len(), 20);
//!
//! let back = M::decode(&bytes).unwrap();
//! assert_eq!(back.get("foo"), Some(&Value::from(1)));
//! ```

mod array;
mod document;
mod error;
mod ordered;
mod raw;
mod unordered;
mod value;

pub use array::docs_to_array;
pub use document::{BsonDocument, DecodeOptions, DocumentModel};
pub use error::{Error, Result};
pub use ordered::{DocElem, OrderedDocument};
pub use raw::{RawDocElem, RawDocument, RawElement};
pub use unordered::UnorderedDocument;
pub use value::Value;

pub use mgobson_pack::bson::{element_type, BsonValue, DEFAULT_MAX_DEPTH};

/// Short alias for [`UnorderedDocument`].
pub type M = UnorderedDocument;
/// Short alias for [`OrderedDocument`].
pub type D = OrderedDocument;
/// Short alias for [`RawDocument`].
pub type RawD = RawDocument;
/// Short alias for [`RawElement`].
pub type Raw = RawElement;
