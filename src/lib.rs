// ABOUTME: Main library module for the envgen template renderer
// ABOUTME: Exports all core modules and provides the public API

pub mod cli;
pub mod generate;
pub mod query;
pub mod template;

// Re-export commonly used types
pub use cli::{App, Args};
pub use generate::{Delimiters, Generator, Job, RenderOptions, RenderOutcome, Renderer};
pub use template::{EnvContext, TemplateEngine};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
