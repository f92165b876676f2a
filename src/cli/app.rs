// ABOUTME: Main application orchestration for the envgen CLI
// ABOUTME: Coordinates argument parsing, logging setup, and batch generation

use anyhow::Result;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use super::args::{parse_delimiters, Args};
use crate::generate::{Generator, RenderOptions};

pub struct App;

impl App {
    /// Create a new application instance
    pub fn new() -> Self {
        Self
    }

    /// Initialize logging. Logs go to stderr; stdout is reserved for
    /// rendered template output.
    pub fn init_logging(&self, verbose: bool, no_color: bool) {
        let log_level = if verbose { "debug" } else { "info" };

        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_ansi(!no_color)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the application with parsed arguments. The first error aborts
    /// the remaining jobs and becomes the process exit status.
    pub fn run(&self, args: Args) -> Result<()> {
        self.init_logging(args.verbose, args.no_color);

        debug!("Starting envgen v{}", env!("CARGO_PKG_VERSION"));

        let delimiters = args.delims.as_deref().map(parse_delimiters).transpose()?;
        let jobs = Args::parse_jobs(&args.jobs)?;

        let options = RenderOptions {
            delimiters,
            no_overwrite: args.no_overwrite,
        };

        let generator = Generator::new(&options);
        let summary = generator.run(&jobs)?;

        info!(
            "done: {} rendered, {} skipped",
            summary.rendered, summary.skipped
        );

        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
