//! # pforge CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Every test runs the
//! compiled `pforge` binary inside its own temporary workspace:
//!
//! ```text
//! <tmp>/.git/        stops the `.pforge.toml` search at the workspace
//! <tmp>/config/      XDG_CONFIG_HOME, so no user configuration leaks in
//! <tmp>/store/       PFORGE_ROOT, the template store
//! <tmp>/work/        current directory of the command
//! ```
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An isolated workspace for one test.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp workspace");
        for sub in [".git", "config", "store", "work"] {
            fs::create_dir_all(dir.path().join(sub)).expect("Failed to prepare workspace");
        }
        Self { dir }
    }

    pub fn store(&self) -> PathBuf {
        self.dir.path().join("store")
    }

    pub fn work(&self) -> PathBuf {
        self.dir.path().join("work")
    }

    /// A `pforge` command running in `work/` against `store/`.
    pub fn pforge(&self) -> Command {
        let mut cmd = Command::cargo_bin("pforge").expect("Failed to find pforge binary for testing");
        cmd.current_dir(self.work())
            .env("PFORGE_ROOT", self.store())
            .env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .env_remove("RUST_LOG");
        cmd
    }
}

/// Writes `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}
