// ABOUTME: Error types for template engine operations
// ABOUTME: Defines specific error types for template compilation and rendering

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("template syntax error: {0}")]
    SyntaxError(String),

    #[error("template render error: {0}")]
    RenderError(#[from] handlebars::RenderError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
