// ABOUTME: Batch generator dispatching jobs to the renderer
// ABOUTME: Expands directory templates into one render per direct entry

use std::fs;
use std::path::Path;
use tracing::debug;

use super::error::{GenerateError, Result};
use super::renderer::{RenderOutcome, Renderer};
use super::{Job, RenderOptions};

/// Counts for a completed run. Skips are successes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub rendered: usize,
    pub skipped: usize,
}

impl Summary {
    fn record(&mut self, outcome: RenderOutcome) {
        match outcome {
            RenderOutcome::Rendered => self.rendered += 1,
            RenderOutcome::Skipped => self.skipped += 1,
        }
    }

    fn merge(&mut self, other: Summary) {
        self.rendered += other.rendered;
        self.skipped += other.skipped;
    }
}

pub struct Generator {
    renderer: Renderer,
}

impl Generator {
    pub fn new(options: &RenderOptions) -> Self {
        Self {
            renderer: Renderer::new(options),
        }
    }

    /// Run jobs in order. The first failure aborts the remaining jobs.
    pub fn run(&self, jobs: &[Job]) -> Result<Summary> {
        let mut summary = Summary::default();
        for job in jobs {
            summary.merge(self.process(job)?);
        }
        Ok(summary)
    }

    /// Render one job, expanding directory templates into per-entry renders
    pub fn process(&self, job: &Job) -> Result<Summary> {
        let metadata = fs::metadata(&job.template).map_err(|e| GenerateError::StatError {
            path: job.template.clone(),
            source: e,
        })?;

        if metadata.is_dir() {
            self.render_dir(&job.template, job.dest.as_deref())
        } else {
            let mut summary = Summary::default();
            summary.record(self.renderer.render_file(&job.template, job.dest.as_deref())?);
            Ok(summary)
        }
    }

    /// Render every direct entry of a template directory, pairing
    /// `source/entry` with `dest/entry` (or stdout when no destination is
    /// given). Does not recurse. The destination directory must already
    /// exist.
    fn render_dir(&self, template_dir: &Path, dest_dir: Option<&Path>) -> Result<Summary> {
        if let Some(dest) = dest_dir {
            let metadata = fs::metadata(dest).map_err(|e| GenerateError::StatError {
                path: dest.to_path_buf(),
                source: e,
            })?;
            if !metadata.is_dir() {
                return Err(GenerateError::DestNotDirectory);
            }
        }

        debug!("rendering directory {}", template_dir.display());

        let entries = fs::read_dir(template_dir).map_err(|e| GenerateError::BadDirectory {
            path: template_dir.to_path_buf(),
            source: e,
        })?;

        let mut summary = Summary::default();
        for entry in entries {
            let entry = entry.map_err(|e| GenerateError::BadDirectory {
                path: template_dir.to_path_buf(),
                source: e,
            })?;

            let dest = dest_dir.map(|d| d.join(entry.file_name()));
            summary.record(self.renderer.render_file(&entry.path(), dest.as_deref())?);
        }

        Ok(summary)
    }
}
