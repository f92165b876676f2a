// ABOUTME: Command line interface module for envgen
// ABOUTME: Provides argument parsing and application orchestration

pub mod app;
pub mod args;

pub use app::App;
pub use args::Args;
