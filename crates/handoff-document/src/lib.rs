//! handoff document model
//!
//! A loosely structured JSON document with checked mutations.
//!
//! # Core Concepts
//!
//! - [`Document`]: wrapper over `serde_json::Value` for a single JSON object
//! - [`DocumentError`]: typed shape violations (missing field, wrong type)
//! - [`seed::initial_document`]: the built-in first document of the pipeline
//!
//! Mutations check the document's runtime shape before touching it: setting
//! a field requires an object root, and appending to a sequence field
//! requires that field to already exist and hold an array. Nothing is
//! created or coerced silently.

#![warn(unreachable_pub)]

mod document;
mod error;
pub mod seed;

pub use document::Document;
pub use error::{kind_of, DocumentError};
