//! Conversion between raw store documents and typed entities.
//!
//! Documents are schema-free JSON objects. Each entity reads the fields it
//! knows, applies its per-field defaults and ignores everything else (store
//! metadata such as ids and timestamps lives next to the payload).

use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::ModelError;

/// A raw document as stored in a collection.
pub type Document = Map<String, Value>;

/// An entity that lives in a named collection of the document store.
pub trait DocumentShape: Sized + Serialize {
    /// Collection name: the lowercased entity name.
    const COLLECTION: &'static str;

    /// Build the entity from a stored document, applying field defaults.
    fn from_document(doc: &Document) -> Result<Self, ModelError>;

    /// Render the entity as a document ready to be written.
    fn to_document(&self) -> Document {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

fn present<'a>(doc: &'a Document, field: &str) -> Option<&'a Value> {
    doc.get(field).filter(|v| !v.is_null())
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn wrong_type(field: &str, expected: &str, got: &Value) -> ModelError {
    ModelError::validation(format!("field `{field}` must be {expected}, got {}", type_name(got)))
}

pub(crate) fn required_str(doc: &Document, field: &str) -> Result<String, ModelError> {
    match present(doc, field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(wrong_type(field, "a string", other)),
        None => Err(ModelError::validation(format!("missing field `{field}`"))),
    }
}

pub(crate) fn optional_str(doc: &Document, field: &str) -> Result<Option<String>, ModelError> {
    match present(doc, field) {
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(wrong_type(field, "a string", other)),
        None => Ok(None),
    }
}

/// Missing or null lists read as empty; element order is kept.
pub(crate) fn string_list(doc: &Document, field: &str) -> Result<Vec<String>, ModelError> {
    match present(doc, field) {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(wrong_type(field, "a list of strings", other)),
            })
            .collect(),
        Some(other) => Err(wrong_type(field, "a list of strings", other)),
        None => Ok(Vec::new()),
    }
}

/// Booleans, or numbers read as "non-zero".
pub(crate) fn flag(doc: &Document, field: &str, default: bool) -> Result<bool, ModelError> {
    match present(doc, field) {
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::Number(n)) => Ok(n.as_f64().map_or(false, |f| f != 0.0)),
        Some(other) => Err(wrong_type(field, "a boolean", other)),
        None => Ok(default),
    }
}

/// Numbers, or strings holding a number.
pub(crate) fn decimal(doc: &Document, field: &str, default: f64) -> Result<f64, ModelError> {
    let value = match present(doc, field) {
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| ModelError::validation(format!("field `{field}` is not representable")))?,
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ModelError::validation(format!("field `{field}` is not a number: {s:?}")))?,
        Some(other) => return Err(wrong_type(field, "a number", other)),
        None => default,
    };
    if !value.is_finite() {
        return Err(ModelError::validation(format!("field `{field}` must be finite")));
    }
    Ok(value)
}
