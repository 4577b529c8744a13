//! Common test utilities and fixtures for modgraph integration tests
//!
//! Each [`TestProject`] owns a temporary directory holding a `modgraph.toml`
//! and runs the compiled binary inside it with a clean environment.

// Not every suite uses every helper
#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would otherwise leak into the context layering.
const CONTEXT_ENV_VARS: [&str; 3] = ["MODGRAPH_TARGET", "MODGRAPH_PLATFORM", "MODGRAPH_CONFIGURATION"];

/// Test project builder for creating test environments
pub struct TestProject {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    project_dir: PathBuf,
}

impl TestProject {
    /// Create an empty project directory
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().join("project");
        fs::create_dir_all(&project_dir)?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// Create a project whose manifest is `content`
    pub fn with_manifest(content: &str) -> Result<Self> {
        let project = Self::new()?;
        project.write_manifest(content)?;
        Ok(project)
    }

    /// Get the project directory path
    pub fn project_path(&self) -> &Path {
        &self.project_dir
    }

    /// Path of the project's manifest
    pub fn manifest_path(&self) -> PathBuf {
        self.project_dir.join("modgraph.toml")
    }

    /// Write a manifest file to the project directory
    pub fn write_manifest(&self, content: &str) -> Result<()> {
        let manifest_path = self.manifest_path();
        fs::write(&manifest_path, content)
            .with_context(|| format!("Failed to write manifest to {}", manifest_path.display()))?;
        Ok(())
    }

    /// The modgraph binary, ready to run in the project directory
    pub fn command(&self) -> Command {
        self.command_in(&self.project_dir)
    }

    /// The modgraph binary, ready to run in `dir`
    pub fn command_in(&self, dir: &Path) -> Command {
        let mut cmd = Command::cargo_bin("modgraph").expect("modgraph binary is built for tests");
        cmd.current_dir(dir).env("NO_COLOR", "1").env_remove("RUST_LOG");
        for var in CONTEXT_ENV_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Run modgraph with `args` and capture its output
    pub fn run_modgraph(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = self.command().args(args).output().context("Failed to run modgraph command")?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }
}

/// Command output helper
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Assert the command succeeded
    pub fn assert_success(&self) -> &Self {
        assert!(self.success, "Command failed with code {:?}\nStderr: {}", self.code, self.stderr);
        self
    }

    /// Assert the command failed with exit code 1
    pub fn assert_failure(&self) -> &Self {
        assert_eq!(self.code, Some(1), "Expected exit code 1\nStdout: {}", self.stdout);
        self
    }

    /// Assert stdout contains the given text
    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Expected stdout to contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }

    /// Assert stderr contains the given text
    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        assert!(
            self.stderr.contains(text),
            "Expected stderr to contain '{}'\nActual stderr: {}",
            text,
            self.stderr
        );
        self
    }

    /// Parse stdout as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{}", self.stdout))
    }
}
