// ABOUTME: Rendering job model and batch generation for envgen
// ABOUTME: Defines jobs, render options, and the renderer/generator pair

pub mod batch;
pub mod error;
pub mod renderer;

pub use batch::{Generator, Summary};
pub use error::{GenerateError, Result};
pub use renderer::{RenderOutcome, Renderer};

use std::path::PathBuf;

/// One template-to-destination rendering task. A missing destination means
/// standard output. If the template path is a directory, the job expands to
/// one render per directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub template: PathBuf,
    pub dest: Option<PathBuf>,
}

impl Job {
    pub fn new(template: impl Into<PathBuf>, dest: Option<PathBuf>) -> Self {
        Self {
            template: template.into(),
            dest,
        }
    }

    pub fn to_stdout(template: impl Into<PathBuf>) -> Self {
        Self::new(template, None)
    }
}

/// The template expression marker pair, default `{{` / `}}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    pub left: String,
    pub right: String,
}

impl Delimiters {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn is_default(&self) -> bool {
        self.left == "{{" && self.right == "}}"
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::new("{{", "}}")
    }
}

/// Process-wide rendering options, built once from the CLI and read-only
/// thereafter. Delimiters apply identically to every template in the run.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub delimiters: Option<Delimiters>,
    pub no_overwrite: bool,
}
