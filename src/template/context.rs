// ABOUTME: Render context exposing the process environment to templates
// ABOUTME: Snapshots environment variables at render time as the `Env` mapping

use serde::Serialize;
use std::collections::HashMap;
use std::env;

use super::error::{Result, TemplateError};

/// The value a template is executed against. Serializes as
/// `{ "Env": { name: value, ... } }` so templates can read
/// `{{Env.HOME}}` or pass `Env` to functions like `contains`.
#[derive(Debug, Clone, Serialize)]
pub struct EnvContext {
    #[serde(rename = "Env")]
    env: HashMap<String, String>,
}

impl EnvContext {
    /// Snapshot the current process environment
    pub fn snapshot() -> Self {
        Self {
            env: env::vars().collect(),
        }
    }

    /// Build a context from an explicit variable mapping
    pub fn from_vars(vars: HashMap<String, String>) -> Self {
        Self { env: vars }
    }

    /// Access the environment mapping
    pub fn env(&self) -> &HashMap<String, String> {
        &self.env
    }

    /// Convert context to JSON for handlebars rendering
    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(TemplateError::JsonError)
    }
}
