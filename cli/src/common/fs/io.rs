//! # pforge Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! This module centralizes the small filesystem I/O helpers shared by harvest,
//! forge and the template listing: ensuring directories exist, reading and
//! writing whole files, and enumerating the regular files below a directory.
//!
//! ## Architecture
//!
//! - **`ensure_dir_exists`**: `mkdir -p`, but fails if the path exists and is not a directory.
//! - **`read_file_to_string`**: `fs::read_to_string` with the path in the error context.
//! - **`write_string_to_file`**: Writes a string, creating the parent directory first.
//! - **`list_files`**: Sorted relative paths of every regular file below a directory.
//! - **`count_files`**: Number of regular files below a directory.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io;
//!
//! io::ensure_dir_exists(&project_dir.join("src"))?;
//! io::write_string_to_file(&project_dir.join("README.md"), &readme)?;
//! let count = io::count_files(&template_dir)?;
//! ```
//!
use crate::core::error::{ForgeError, Result};
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist, the directory is created along with any missing
/// parents. If the path exists but is not a directory, a
/// `ForgeError::FileSystem` is returned.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The path exists but is not a directory.
/// - Creating the directory fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(ForgeError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Reads the entire content of a file into a string.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Writes string content to a specified file path, overwriting if it exists.
///
/// The parent directory is created first when missing.
///
/// # Errors
///
/// Returns an `Err` if the parent directory cannot be created or the write fails.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;
    info!("Wrote content to file: {:?}", path);
    Ok(())
}

/// Lists every regular file below `dir`, as paths relative to `dir`.
///
/// The walk is recursive. A symbolic link pointing at a file is listed like a
/// regular file (copying it copies the target's content); linked directories are
/// not descended into. Results are sorted so reports and listings are stable
/// between runs.
///
/// # Errors
///
/// Returns an `Err` if `dir` (or any directory below it) cannot be read.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk directory {:?}", dir))?;
        if !entry.file_type().is_file() && !entry.path().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(dir)
            .with_context(|| format!("Failed to relativize {:?} against {:?}", entry.path(), dir))?;
        files.push(relative.to_path_buf());
    }
    Ok(files)
}

/// Counts the regular files below `dir` (recursively).
pub fn count_files(dir: &Path) -> Result<usize> {
    Ok(list_files(dir)?.len())
}
