// ABOUTME: Renders one template file to a destination file or stdout
// ABOUTME: Applies the no-overwrite policy before any compilation or IO

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, info};

use super::error::{GenerateError, Result};
use super::RenderOptions;
use crate::template::{EnvContext, TemplateEngine};

/// The result of rendering a single job entry. A no-overwrite skip is
/// success, not failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered,
    Skipped,
}

pub struct Renderer {
    engine: TemplateEngine,
    no_overwrite: bool,
}

impl Renderer {
    pub fn new(options: &RenderOptions) -> Self {
        Self {
            engine: TemplateEngine::with_delimiters(options.delimiters.clone()),
            no_overwrite: options.no_overwrite,
        }
    }

    /// Render a single template file. The destination file is only opened
    /// after the overwrite check, and is created/truncated only once the
    /// template has rendered successfully, so a render failure never
    /// clobbers an existing destination.
    pub fn render_file(&self, template_path: &Path, dest: Option<&Path>) -> Result<RenderOutcome> {
        if self.no_overwrite {
            if let Some(dest) = dest {
                if dest.exists() {
                    debug!(
                        "skipping {}: destination {} already exists",
                        template_path.display(),
                        dest.display()
                    );
                    return Ok(RenderOutcome::Skipped);
                }
            }
        }

        let source =
            fs::read_to_string(template_path).map_err(|e| GenerateError::ReadError {
                path: template_path.to_path_buf(),
                source: e,
            })?;

        let context = EnvContext::snapshot();
        let rendered =
            self.engine
                .render(&source, &context)
                .map_err(|e| GenerateError::RenderError {
                    path: template_path.to_path_buf(),
                    source: e,
                })?;

        match dest {
            Some(path) => {
                fs::write(path, &rendered).map_err(|e| GenerateError::CreateError {
                    path: path.to_path_buf(),
                    source: e,
                })?;
                info!(
                    "rendered {} -> {} ({} bytes)",
                    template_path.display(),
                    path.display(),
                    rendered.len()
                );
            }
            None => {
                io::stdout().lock().write_all(rendered.as_bytes())?;
            }
        }

        Ok(RenderOutcome::Rendered)
    }
}
