//! Built-in seed document
//!
//! The first document of the pipeline is generated in memory, standing in
//! for whatever process would produce real data.

use crate::document::Document;
use serde_json::json;

/// The initial document written to the first handoff file
#[must_use]
pub fn initial_document() -> Document {
    Document::new(json!({
        "conference": "FOMMS",
        "year": 2015,
        "languages": ["python"],
        "names": [
            {"first": "Patrick", "last": "Fuller"},
            {"first": "Chris", "last": "Wilmer"}
        ]
    }))
}
