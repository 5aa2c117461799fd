//! Error types for the pipeline
//!
//! One enum per concern:
//! - Ingress (file → document): [`ParseError`]
//! - Transform (stage application): [`StageError`]
//! - Egress (document → file): [`WriteError`]
//! - Whole-pipeline umbrella: [`PipelineError`]

use handoff_document::DocumentError;
use std::path::PathBuf;

/// Errors during handoff file ingress
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File that failed to read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// File content is not valid JSON
    #[error("syntax error in {path}: {message}")]
    Syntax {
        /// File that failed to parse
        path: PathBuf,
        /// Parser diagnostic
        message: String,
    },

    /// File exceeds the boundary's size cap
    #[error("{path} too large: {size} bytes (max: {max})")]
    TooLarge {
        /// Offending file
        path: PathBuf,
        /// Actual size in bytes
        size: usize,
        /// Configured maximum
        max: usize,
    },
}

impl ParseError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create syntax error for path
    pub fn syntax_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Syntax {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Errors during handoff file egress
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// IO error during file write
    #[error("io error writing {path}: {source}")]
    Io {
        /// File that failed to write
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Document could not be serialized
    #[error("serialization failed: {0}")]
    Format(String),
}

impl WriteError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A stage failed while applying one of its patches
#[derive(Debug, thiserror::Error)]
#[error("stage '{stage}' failed applying {patch}: {source}")]
pub struct StageError {
    /// Stage name
    pub stage: String,
    /// Description of the failed patch
    pub patch: String,
    /// The underlying shape violation
    #[source]
    pub source: DocumentError,
}

/// Combined pipeline error
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Ingress failure
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Stage application failure
    #[error("stage error: {0}")]
    Stage(#[from] StageError),

    /// Egress failure
    #[error("write error: {0}")]
    Write(#[from] WriteError),

    /// No stage registered under the requested name
    #[error("unknown stage: '{0}'")]
    UnknownStage(String),
}
