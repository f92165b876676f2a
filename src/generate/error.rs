// ABOUTME: Error types for rendering and batch generation
// ABOUTME: Wraps filesystem failures with the offending path for reporting

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::template::TemplateError;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("unable to stat {path}: {source}")]
    StatError { path: PathBuf, source: io::Error },

    #[error("unable to read template {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },

    #[error("unable to create {path}: {source}")]
    CreateError { path: PathBuf, source: io::Error },

    #[error("unable to write output: {0}")]
    WriteError(#[from] io::Error),

    #[error("bad directory {path}: {source}")]
    BadDirectory { path: PathBuf, source: io::Error },

    #[error("if template is a directory, dest must also be a directory (or stdout)")]
    DestNotDirectory,

    #[error("template {path}: {source}")]
    RenderError {
        path: PathBuf,
        source: TemplateError,
    },
}

pub type Result<T> = std::result::Result<T, GenerateError>;
