//! Shared testing utilities for lexprompt CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated working directory for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");

        Self { root, work_dir }
    }

    /// Path to the directory used as the CLI's working directory.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for the compiled binary with no credential in its environment.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("lexprompt").expect("Failed to locate lexprompt binary");
        cmd.current_dir(self.work_dir())
            .env("HOME", self.root.path())
            .env_remove("API_KEY")
            .env_remove("GEMINI_API_KEY")
            .env_remove("LEXPROMPT_LOG");
        cmd
    }

    /// Build a command carrying a fake credential.
    pub fn cli_with_key(&self) -> Command {
        let mut cmd = self.cli();
        cmd.env("API_KEY", "test-key");
        cmd
    }

    /// Point the default `lexprompt.toml` of the work directory at `api_base`.
    pub fn write_config(&self, api_base: &str) {
        let content = format!(
            "[gateway]\napi_base = \"{}\"\nmodel = \"test-model\"\ntimeout_secs = 5\n",
            api_base
        );
        fs::write(self.work_dir.join("lexprompt.toml"), content).expect("Failed to write config");
    }

    /// Write a file into the work directory and return its path.
    pub fn write_file(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.work_dir.join(name);
        fs::write(&path, bytes).expect("Failed to write fixture file");
        path
    }

    pub fn read_file(&self, relative: &str) -> String {
        fs::read_to_string(self.work_dir.join(relative)).expect("Failed to read output file")
    }
}

/// Candidates payload as returned by `generateContent`.
#[allow(dead_code)]
pub fn candidates_body(text: &str) -> String {
    serde_json::json!({
        "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
    })
    .to_string()
}
