// ABOUTME: Template engine module for the envgen renderer
// ABOUTME: Provides the handlebars engine, environment context, and function library

pub mod context;
pub mod engine;
pub mod error;
pub mod functions;

pub use context::EnvContext;
pub use engine::TemplateEngine;
pub use error::{Result, TemplateError};
pub use functions::LoopRange;
