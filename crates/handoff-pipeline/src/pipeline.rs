//! Explicit pipeline composition
//!
//! Stage ordering lives in the [`Pipeline`]'s stage list, enforced by the
//! call graph rather than by filename convention. Later stages see earlier
//! results through the file handoff.

use crate::boundary::FileBoundary;
use crate::error::PipelineError;
use crate::stage::{built_in_stages, Stage, StageInput};
use std::path::Path;

/// Ordered sequence of stages sharing a file-based handoff
///
/// Execution is strictly sequential and synchronous; each stage reads its
/// input fully before writing its output.
#[derive(Debug, Clone)]
pub struct Pipeline {
    boundary: FileBoundary,
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Create a pipeline from explicit parts
    #[inline]
    #[must_use]
    pub fn new(boundary: FileBoundary, stages: Vec<Stage>) -> Self {
        Self { boundary, stages }
    }

    /// The built-in four-stage pipeline (`v1.json` → `v4.json`)
    #[inline]
    #[must_use]
    pub fn built_in() -> Self {
        Self::new(FileBoundary::new(), built_in_stages())
    }

    /// Registered stages, in execution order
    #[inline]
    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Run every stage in order against a base directory
    ///
    /// # Errors
    /// Stops at the first failing stage and propagates its error; files
    /// written by earlier stages remain in place
    pub fn run(&self, dir: &Path) -> Result<(), PipelineError> {
        for stage in &self.stages {
            self.execute(dir, stage)?;
        }
        Ok(())
    }

    /// Run a single named stage against a base directory
    ///
    /// # Errors
    /// - [`PipelineError::UnknownStage`] if no stage carries the name
    /// - Otherwise whatever the stage's ingress/apply/egress raises
    pub fn run_stage(&self, dir: &Path, name: &str) -> Result<(), PipelineError> {
        let stage = self
            .stages
            .iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| PipelineError::UnknownStage(name.to_string()))?;
        self.execute(dir, stage)
    }

    /// Ingress → transform → egress for one stage
    fn execute(&self, dir: &Path, stage: &Stage) -> Result<(), PipelineError> {
        let input = match stage.input() {
            StageInput::Seed => handoff_document::seed::initial_document(),
            StageInput::File(name) => {
                let (document, metadata) = self.boundary.read(dir.join(name))?;
                tracing::debug!(
                    stage = stage.name(),
                    checksum = %metadata.checksum.to_hex(),
                    "input checksum"
                );
                document
            }
        };

        let output = stage.apply(input)?;
        self.boundary.write(dir.join(stage.output()), &output)?;

        tracing::info!(
            stage = stage.name(),
            output = stage.output(),
            "stage complete"
        );
        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::built_in()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_pipeline_has_four_stages() {
        let pipeline = Pipeline::built_in();
        let names: Vec<_> = pipeline.stages().iter().map(Stage::name).collect();
        assert_eq!(
            names,
            ["seed", "mutate-location", "mutate-chair", "append-cpp"]
        );
    }

    #[test]
    fn unknown_stage_is_rejected_before_any_io() {
        let dir = tempfile::tempdir().unwrap();
        let err = Pipeline::built_in()
            .run_stage(dir.path(), "mutate-nothing")
            .unwrap_err();
        assert!(matches!(err, PipelineError::UnknownStage(_)));
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }
}
