//! handoff pipeline
//!
//! Moves a JSON [`Document`](handoff_document::Document) through an ordered
//! sequence of stages over a file-based handoff.
//!
//! # Core Operations
//!
//! - **Ingress**: read and parse a handoff file into a document
//! - **Transform**: apply a stage's patches to produce a new document
//! - **Egress**: serialize the document to the next handoff file
//!
//! # Architecture
//!
//! ```text
//! v1.json → FileBoundary → Document → Stage → Document' → FileBoundary → v2.json
//! ```
//!
//! Stage ordering is enforced by [`Pipeline`] composition, not by filename
//! convention: each stage is a pure document transformation, and
//! [`FileBoundary`] is the only component that touches the filesystem.
//! Stages read their input fully before writing any output, so a failed
//! stage never leaves a partial handoff file behind.

#![warn(unreachable_pub)]

mod boundary;
mod error;
mod patch;
mod pipeline;
mod stage;

pub use boundary::{FileBoundary, SourceMetadata};
pub use error::{ParseError, PipelineError, StageError, WriteError};
pub use patch::Patch;
pub use pipeline::Pipeline;
pub use stage::{built_in_stages, Stage, StageInput};
