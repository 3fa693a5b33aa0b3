//! BSON element library for mgobson.
//!
//! Provides the typed [`bson::BsonValue`] model, a document encoder and
//! decoder, and [`bson::BsonElementIter`], a streaming iterator that walks a
//! document buffer one element at a time without interpreting payloads.

pub mod bson;

pub use bson::{
    BsonDecoder, BsonElement, BsonElementIter, BsonEncodeError, BsonEncoder, BsonError, BsonValue,
};
