//! Typed errors for document shape violations

use serde_json::Value;

/// Errors raised when a mutation hits an unexpected document shape
///
/// These are runtime checks over an untyped JSON value: the shape is
/// assumed by the caller and verified before each mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    /// Document root is not a JSON object
    #[error("document root is not an object (found {actual})")]
    NotAnObject {
        /// JSON type name of the actual root value
        actual: &'static str,
    },

    /// Expected field is absent
    #[error("field missing: '{0}'")]
    FieldMissing(String),

    /// Field exists but holds the wrong JSON type
    #[error("wrong type for field '{field}': expected {expected}, found {actual}")]
    WrongType {
        /// Field name
        field: String,
        /// Expected JSON type name
        expected: &'static str,
        /// Actual JSON type name
        actual: &'static str,
    },
}

impl DocumentError {
    /// Create a missing-field error
    pub fn field_missing(field: impl Into<String>) -> Self {
        Self::FieldMissing(field.into())
    }

    /// Create a wrong-type error from the offending value
    pub fn wrong_type(field: impl Into<String>, expected: &'static str, found: &Value) -> Self {
        Self::WrongType {
            field: field.into(),
            expected,
            actual: kind_of(found),
        }
    }
}

/// JSON type name of a value, for error messages
#[inline]
#[must_use]
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wrong_type_display() {
        let err = DocumentError::wrong_type("languages", "array", &json!("ruby"));
        assert_eq!(
            err.to_string(),
            "wrong type for field 'languages': expected array, found string"
        );
    }

    #[test]
    fn field_missing_display() {
        let err = DocumentError::field_missing("languages");
        assert_eq!(err.to_string(), "field missing: 'languages'");
    }

    #[test]
    fn kind_of_covers_all_json_types() {
        assert_eq!(kind_of(&json!(null)), "null");
        assert_eq!(kind_of(&json!(true)), "bool");
        assert_eq!(kind_of(&json!(2015)), "number");
        assert_eq!(kind_of(&json!("FOMMS")), "string");
        assert_eq!(kind_of(&json!([])), "array");
        assert_eq!(kind_of(&json!({})), "object");
    }
}
