use mgobson_pack::bson::BsonValue;

use crate::document::BsonDocument;
use crate::error::{Error, Result};
use crate::value::Value;

/// Builds a BSON array whose items are the given documents, in any mix of
/// representations. Handy for commands such as `insert` that take a list of
/// documents.
///
/// Fails with [`Error::NotADocument`] if an item is not a document.
pub fn docs_to_array(docs: &[Value]) -> Result<BsonValue> {
    let items = docs
        .iter()
        .map(|doc| match doc {
            Value::Ordered(d) => Ok(BsonValue::Document(d.to_document_model()?)),
            Value::Unordered(m) => Ok(BsonValue::Document(m.to_document_model()?)),
            Value::Raw(r) => Ok(BsonValue::Document(r.to_document_model()?)),
            Value::Scalar(BsonValue::Document(fields)) => Ok(BsonValue::Document(fields.clone())),
            other => Err(Error::NotADocument(other.kind())),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(BsonValue::Array(items))
}
