// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides shared functionality for setting up template test environments

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use envgen::EnvContext;

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a template file under the test directory and return its path
    pub fn create_template(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, content).expect("Failed to write template file");
        path
    }

    /// Create a template directory with the given (name, content) entries
    pub fn create_template_dir(&self, dir_name: &str, entries: &[(&str, &str)]) -> PathBuf {
        let dir = self.path().join(dir_name);
        fs::create_dir(&dir).expect("Failed to create template directory");
        for (name, content) in entries {
            fs::write(dir.join(name), content).expect("Failed to write template entry");
        }
        dir
    }

    /// Create an empty destination directory
    pub fn create_dest_dir(&self, name: &str) -> PathBuf {
        let dir = self.path().join(name);
        fs::create_dir(&dir).expect("Failed to create dest directory");
        dir
    }

    pub fn dest_file(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }
}

/// Build a render context from explicit variables instead of the process
/// environment, keeping tests independent of the host
pub fn context_with(vars: &[(&str, &str)]) -> EnvContext {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    EnvContext::from_vars(map)
}
