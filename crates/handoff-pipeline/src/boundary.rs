//! File boundary - the single filesystem touchpoint
//!
//! Stages never touch files directly; all ingress and egress go through
//! [`FileBoundary`]. Reads and writes are scoped and blocking: a handle is
//! opened, fully consumed or written, and released before anything else
//! happens.

use crate::error::{ParseError, WriteError};
use handoff_document::Document;
use std::path::{Path, PathBuf};

/// Default cap on handoff file size (bytes)
const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Metadata about a handoff file as it was read
#[derive(Debug, Clone)]
pub struct SourceMetadata {
    /// File path
    pub path: PathBuf,
    /// Blake3 checksum of the raw bytes
    pub checksum: blake3::Hash,
}

/// The trusted boundary between the filesystem and the document model
#[derive(Debug, Clone)]
pub struct FileBoundary {
    /// Maximum file size to parse (bytes)
    max_file_size: usize,
}

impl FileBoundary {
    /// Create a boundary with the default size cap
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Create a boundary with a specific size cap
    #[inline]
    #[must_use]
    pub fn with_max_file_size(max_file_size: usize) -> Self {
        Self { max_file_size }
    }

    /// Read and parse a handoff file (ingress)
    ///
    /// The file is consumed in one scoped read; the handle is released
    /// before parsing begins.
    ///
    /// # Errors
    /// - [`ParseError::Io`] if the file cannot be read
    /// - [`ParseError::TooLarge`] if it exceeds the size cap
    /// - [`ParseError::Syntax`] if it is not valid JSON
    pub fn read(&self, path: impl AsRef<Path>) -> Result<(Document, SourceMetadata), ParseError> {
        let path = path.as_ref();

        let content =
            std::fs::read_to_string(path).map_err(|e| ParseError::io_error(path, e))?;

        if content.len() > self.max_file_size {
            return Err(ParseError::TooLarge {
                path: path.to_path_buf(),
                size: content.len(),
                max: self.max_file_size,
            });
        }

        let checksum = blake3::hash(content.as_bytes());
        tracing::debug!(path = %path.display(), checksum = %checksum.to_hex(), "read handoff file");

        let document = Document::from_json(&content)
            .map_err(|e| ParseError::syntax_error(path, e.to_string()))?;

        Ok((
            document,
            SourceMetadata {
                path: path.to_path_buf(),
                checksum,
            },
        ))
    }

    /// Serialize a document to a handoff file (egress)
    ///
    /// Overwrites any existing content at the path.
    ///
    /// # Errors
    /// - [`WriteError::Format`] if serialization fails
    /// - [`WriteError::Io`] if the file cannot be written
    pub fn write(&self, path: impl AsRef<Path>, document: &Document) -> Result<(), WriteError> {
        let path = path.as_ref();

        let text = document
            .to_json()
            .map_err(|e| WriteError::Format(e.to_string()))?;

        std::fs::write(path, text).map_err(|e| WriteError::io_error(path, e))?;
        tracing::debug!(path = %path.display(), "wrote handoff file");
        Ok(())
    }
}

impl Default for FileBoundary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn read_round_trips_written_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("v1.json");
        let boundary = FileBoundary::new();

        let doc = Document::new(json!({"languages": ["python"], "year": 2015}));
        boundary.write(&path, &doc).unwrap();

        let (read_back, metadata) = boundary.read(&path).unwrap();
        assert_eq!(read_back, doc);
        assert_eq!(metadata.path, path);
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileBoundary::new()
            .read(dir.path().join("absent.json"))
            .unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
    }

    #[test]
    fn read_invalid_json_is_syntax_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{\"languages\":").unwrap();

        let err = FileBoundary::new().read(&path).unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
    }

    #[test]
    fn read_rejects_oversized_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.json");
        std::fs::write(&path, "[1, 2, 3, 4]").unwrap();

        let err = FileBoundary::with_max_file_size(4).read(&path).unwrap_err();
        assert!(matches!(err, ParseError::TooLarge { .. }));
    }

    #[test]
    fn write_overwrites_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("v2.json");
        std::fs::write(&path, "stale garbage").unwrap();

        let boundary = FileBoundary::new();
        let doc = Document::new(json!({"languages": []}));
        boundary.write(&path, &doc).unwrap();

        let (read_back, _) = boundary.read(&path).unwrap();
        assert_eq!(read_back, doc);
    }
}
