//! Shared testing utilities for carrier-owl CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Workflow from the original Python deployment, kept byte-for-byte.
#[allow(dead_code)]
pub const PYTHON_WORKFLOW: &str = include_str!("../fixtures/carrier_owl_python.yml");

/// Testing harness providing an isolated working directory for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for the compiled binary, isolated from the caller's secrets.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("carrier-owl").expect("Failed to locate carrier-owl binary");
        cmd.current_dir(&self.work_dir)
            .env("HOME", self.root.path())
            .env_remove("SLACK_ID")
            .env_remove("LINE_TOKEN")
            .env_remove("DEEPL_AUTH_KEY")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Write `content` to `relative` under the work directory.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.work_dir.join(relative)).expect("Failed to read test file")
    }
}
