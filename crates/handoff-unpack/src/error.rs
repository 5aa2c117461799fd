//! Typed errors for crystal unpacking

use handoff_document::DocumentError;

/// Errors parsing a symmetry operator string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OperatorError {
    /// Wrong number of comma-separated components (three required)
    #[error("expected 3 comma-separated components, found {0}")]
    ComponentCount(usize),

    /// A component contains a character outside the operator grammar
    #[error("unexpected character '{found}' in component '{component}'")]
    UnexpectedChar {
        /// The offending component
        component: String,
        /// The character that does not parse
        found: char,
    },

    /// A fraction is missing a digit or divides by zero
    #[error("malformed fraction in component '{component}'")]
    BadFraction {
        /// The offending component
        component: String,
    },
}

/// Errors during crystal unpacking
#[derive(Debug, thiserror::Error)]
pub enum UnpackError {
    /// Top-level crystal field is absent or has the wrong type
    #[error("crystal shape error: {0}")]
    Shape(#[from] DocumentError),

    /// A symmetry operator string does not parse
    #[error("invalid symmetry operator '{operator}': {source}")]
    Operator {
        /// The operator string as found in the document
        operator: String,
        /// Why it failed to parse
        #[source]
        source: OperatorError,
    },

    /// An entry of the `atoms` array has an unexpected shape
    #[error("atom {index}: {source}")]
    Atom {
        /// Index within the `atoms` array
        index: usize,
        /// The underlying shape violation
        #[source]
        source: DocumentError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use handoff_document::DocumentError;

    #[test]
    fn operator_error_display() {
        let err = OperatorError::UnexpectedChar {
            component: "y+1/2".to_string(),
            found: 'w',
        };
        assert_eq!(err.to_string(), "unexpected character 'w' in component 'y+1/2'");
    }

    #[test]
    fn unpack_error_carries_atom_index() {
        let err = UnpackError::Atom {
            index: 4,
            source: DocumentError::field_missing("location"),
        };
        assert_eq!(err.to_string(), "atom 4: field missing: 'location'");
    }
}
