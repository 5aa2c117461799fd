//! Declarative field patches
//!
//! Semantic operations on a document, not text edits. Each patch targets
//! one top-level field and either overwrites it or appends to it.

use handoff_document::{Document, DocumentError};
use serde_json::Value;
use std::fmt::{self, Display, Formatter};

/// One field mutation applied by a stage
#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    /// Set or overwrite a top-level field
    Set {
        /// Field name
        field: String,
        /// Value to assign
        value: Value,
    },

    /// Append to an existing array-valued field
    ///
    /// Fails if the field is absent or not an array. Append-always: the
    /// same patch applied twice appends twice.
    Push {
        /// Field name
        field: String,
        /// Value to append
        value: Value,
    },
}

impl Patch {
    /// Create a set patch
    #[inline]
    pub fn set(field: impl Into<String>, value: Value) -> Self {
        Self::Set {
            field: field.into(),
            value,
        }
    }

    /// Create a push patch
    #[inline]
    pub fn push(field: impl Into<String>, value: Value) -> Self {
        Self::Push {
            field: field.into(),
            value,
        }
    }

    /// Apply the patch to a document in place
    ///
    /// # Errors
    /// Propagates the document's shape check failures
    pub fn apply(&self, doc: &mut Document) -> Result<(), DocumentError> {
        match self {
            Self::Set { field, value } => doc.set_scalar(field, value.clone()),
            Self::Push { field, value } => doc.push(field, value.clone()),
        }
    }

    /// Field this patch targets
    #[inline]
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Set { field, .. } | Self::Push { field, .. } => field,
        }
    }
}

impl Display for Patch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set { field, value } => write!(f, "set '{field}' to {value}"),
            Self::Push { field, value } => write!(f, "push {value} onto '{field}'"),
        }
    }
}
