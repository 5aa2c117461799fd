//! Dynamic JSON document with checked mutations

use crate::error::{kind_of, DocumentError};
use serde_json::Value;

/// A loosely structured JSON document
///
/// Wraps a `serde_json::Value` and exposes the two mutations the pipeline
/// needs: overwrite a top-level field and append to an array-valued field.
/// Both verify the document's runtime shape first and surface a
/// [`DocumentError`] when the expected shape is absent.
///
/// # Invariants
/// - No field is created implicitly by [`Document::push`]
/// - Values pass through without coercion; what is assigned is what is
///   serialized
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Create a document from a JSON value
    #[inline]
    #[must_use]
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Parse a document from JSON text
    ///
    /// # Errors
    /// Returns the underlying parse error if the text is not valid JSON
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(text)?))
    }

    /// Serialize the document to compact JSON text
    ///
    /// # Errors
    /// Returns the underlying serialization error (practically unreachable
    /// for a plain `Value` tree, but propagated rather than swallowed)
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.root)
    }

    /// Reference to the root value
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Clone the root value out of the document
    #[inline]
    #[must_use]
    pub fn into_root(self) -> Value {
        self.root
    }

    /// Get value at path (dot notation)
    #[must_use]
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut current = &self.root;
        for segment in path.split('.') {
            match current {
                Value::Object(map) => current = map.get(segment)?,
                Value::Array(items) => {
                    let index: usize = segment.parse().ok()?;
                    current = items.get(index)?;
                }
                _ => return None,
            }
        }
        Some(current)
    }

    /// Set or overwrite a top-level field
    ///
    /// # Errors
    /// Returns [`DocumentError::NotAnObject`] if the root is not an object
    pub fn set_scalar(&mut self, field: &str, value: Value) -> Result<(), DocumentError> {
        match &mut self.root {
            Value::Object(map) => {
                map.insert(field.to_string(), value);
                Ok(())
            }
            other => Err(DocumentError::NotAnObject {
                actual: kind_of(other),
            }),
        }
    }

    /// Append a value to an existing array-valued top-level field
    ///
    /// The field must already exist and hold an array; a missing or
    /// non-array field is an error, never silently created.
    ///
    /// # Errors
    /// - [`DocumentError::NotAnObject`] if the root is not an object
    /// - [`DocumentError::FieldMissing`] if the field is absent
    /// - [`DocumentError::WrongType`] if the field is not an array
    pub fn push(&mut self, field: &str, value: Value) -> Result<(), DocumentError> {
        let map = match &mut self.root {
            Value::Object(map) => map,
            other => {
                return Err(DocumentError::NotAnObject {
                    actual: kind_of(other),
                })
            }
        };

        match map.get_mut(field) {
            Some(Value::Array(items)) => {
                items.push(value);
                Ok(())
            }
            Some(other) => Err(DocumentError::wrong_type(field, "array", other)),
            None => Err(DocumentError::field_missing(field)),
        }
    }
}

impl From<Value> for Document {
    fn from(root: Value) -> Self {
        Self::new(root)
    }
}
