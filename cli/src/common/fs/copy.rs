//! # pforge Filesystem Copy Operations
//!
//! File: cli/src/common/fs/copy.rs
//!
//! ## Overview
//!
//! This module provides the two copy primitives everything else is built from:
//! copying a single file and copying a whole directory tree. Both overwrite
//! whatever already sits at the destination, which is what lets a repeated
//! harvest refresh a template in place.
//!
//! ## Architecture
//!
//! - `copy_file` uses the `fs_extra` crate with `overwrite = true`. Permissions
//!   travel with the content (`fs_extra` copies through `std::fs::copy`); the
//!   access and modification times are then copied over from the source.
//! - `copy_tree` walks the source with `walkdir`, recreates every directory and
//!   calls `copy_file` for every regular file. Symbolic links and other special
//!   entries are skipped with a warning.
//!
//! Every error names the paths involved, so the user sees which file broke a run.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::copy;
//!
//! copy::copy_file(&source.join("CLAUDE.md"), &template_dir.join("CLAUDE.md"))?;
//! let copied = copy::copy_tree(&template_dir, &project_dir)?;
//! println!("{} files copied", copied.len());
//! ```
//!
use crate::common::fs::io;
use crate::core::error::Result;
use anyhow::Context;
use std::fs::{self, File, FileTimes};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Copies a single file to `target`, creating missing parent directories.
///
/// An existing file at `target` is overwritten. Permissions and timestamps are
/// carried over from `source`; failing to set the timestamps is logged and
/// otherwise ignored, since the content copy already succeeded.
///
/// # Errors
///
/// Returns an `Err` if the parent directory cannot be created or the copy fails
/// (missing source, permission denied, disk full, ...).
pub fn copy_file(source: &Path, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        io::ensure_dir_exists(parent)?;
    }

    let mut options = fs_extra::file::CopyOptions::new();
    options.overwrite = true;

    fs_extra::file::copy(source, target, &options).map_err(|e| {
        anyhow::anyhow!(e).context(format!(
            "Failed to copy file {:?} to {:?}",
            source, target
        ))
    })?;

    if let Err(e) = copy_timestamps(source, target) {
        warn!("Could not preserve timestamps on {:?}: {:#}", target, e);
    }
    debug!("Copied file {:?} to {:?}", source, target);
    Ok(())
}

fn copy_timestamps(source: &Path, target: &Path) -> Result<()> {
    let metadata = fs::metadata(source)?;
    let times = FileTimes::new()
        .set_accessed(metadata.accessed()?)
        .set_modified(metadata.modified()?);
    File::open(target)?.set_times(times)?;
    Ok(())
}

/// Copies every entry under `source` into `target`, preserving relative structure.
///
/// Directories (including empty ones) are recreated; regular files go through
/// [`copy_file`]. Returns the relative paths of the files copied, in walk order.
///
/// # Errors
///
/// Returns an `Err` on the first entry that cannot be read or written. Files
/// copied before the failure are left in place.
pub fn copy_tree(source: &Path, target: &Path) -> Result<Vec<PathBuf>> {
    debug!("Starting recursive copy from {:?} to {:?}", source, target);
    io::ensure_dir_exists(target)?;

    let mut copied = Vec::new();
    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk directory {:?}", source))?;
        let relative = entry.path().strip_prefix(source).with_context(|| {
            format!("Failed to relativize {:?} against {:?}", entry.path(), source)
        })?;
        let destination = target.join(relative);

        let file_type = entry.file_type();
        if file_type.is_dir() {
            io::ensure_dir_exists(&destination)?;
        } else if file_type.is_file() {
            copy_file(entry.path(), &destination)?;
            copied.push(relative.to_path_buf());
        } else {
            warn!("Skipping unsupported entry (not a file or directory): {:?}", entry.path());
        }
    }

    debug!(
        "Finished recursive copy from {:?} to {:?} ({} files)",
        source,
        target,
        copied.len()
    );
    Ok(copied)
}
