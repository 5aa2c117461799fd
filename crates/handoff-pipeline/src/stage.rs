//! Pipeline stages
//!
//! A stage is a pure document transformation plus the fixed handoff
//! filenames it reads and writes. Applying a stage never touches the
//! filesystem; that is [`FileBoundary`](crate::FileBoundary)'s job.

use crate::error::StageError;
use crate::patch::Patch;
use handoff_document::Document;
use serde_json::json;

/// Where a stage's input document comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageInput {
    /// The built-in seed document (no file read)
    Seed,
    /// A handoff file produced by the previous stage
    File(&'static str),
}

/// One read-mutate-write unit of the pipeline
///
/// # Invariants
/// - Patches apply in declaration order
/// - `apply` is pure: same input document, same result
#[derive(Debug, Clone)]
pub struct Stage {
    name: &'static str,
    input: StageInput,
    output: &'static str,
    patches: Vec<Patch>,
}

impl Stage {
    /// Create a stage
    #[inline]
    #[must_use]
    pub fn new(
        name: &'static str,
        input: StageInput,
        output: &'static str,
        patches: Vec<Patch>,
    ) -> Self {
        Self {
            name,
            input,
            output,
            patches,
        }
    }

    /// Stage name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Input source
    #[inline]
    #[must_use]
    pub fn input(&self) -> StageInput {
        self.input
    }

    /// Output filename
    #[inline]
    #[must_use]
    pub fn output(&self) -> &'static str {
        self.output
    }

    /// Patches in application order
    #[inline]
    #[must_use]
    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    /// Apply all patches to a document, producing the stage's output
    ///
    /// # Errors
    /// Returns [`StageError`] naming the stage and the failed patch if a
    /// shape check fails; the document is consumed either way
    pub fn apply(&self, mut doc: Document) -> Result<Document, StageError> {
        for patch in &self.patches {
            tracing::debug!(stage = self.name, %patch, "applying patch");
            patch.apply(&mut doc).map_err(|source| StageError {
                stage: self.name.to_string(),
                patch: patch.to_string(),
                source,
            })?;
        }
        Ok(doc)
    }
}

/// The built-in stages, in pipeline order
///
/// - `seed`: writes the built-in document to `v1.json`
/// - `mutate-location`: `v1.json` → `v2.json`, sets `location`, appends
///   `"ruby"` to `languages`
/// - `mutate-chair`: `v2.json` → `v3.json`, sets `chair`, appends
///   `"javascript"` to `languages`
/// - `append-cpp`: `v3.json` → `v4.json`, appends `"c++"` to `languages`
#[must_use]
pub fn built_in_stages() -> Vec<Stage> {
    vec![
        Stage::new("seed", StageInput::Seed, "v1.json", vec![]),
        Stage::new(
            "mutate-location",
            StageInput::File("v1.json"),
            "v2.json",
            vec![
                Patch::set("location", json!("Mt. Hood, Oregon")),
                Patch::push("languages", json!("ruby")),
            ],
        ),
        Stage::new(
            "mutate-chair",
            StageInput::File("v2.json"),
            "v3.json",
            vec![
                Patch::set("chair", json!("Randy Snurr")),
                Patch::push("languages", json!("javascript")),
            ],
        ),
        Stage::new(
            "append-cpp",
            StageInput::File("v3.json"),
            "v4.json",
            vec![Patch::push("languages", json!("c++"))],
        ),
    ]
}
