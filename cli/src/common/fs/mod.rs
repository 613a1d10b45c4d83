//! # pforge Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! This module groups the filesystem helpers used by the harvest and forge
//! operations. Nothing in here knows about templates or catalogs; it only moves
//! bytes and creates directories, always naming the path on failure.
//!
//! ## Architecture
//!
//! - **`copy`**: Single-file and whole-tree copies that overwrite the destination and carry permissions and timestamps across.
//! - **`io`**: Directory creation (`ensure_dir_exists`), whole-file reads and writes, and file enumeration (`list_files`, `count_files`).
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::{copy, io};
//!
//! io::ensure_dir_exists(&template_dir)?;
//! copy::copy_file(&source.join(".mcp.json"), &template_dir.join(".mcp.json"))?;
//! ```
//!

/// Contains functions for copying files and directory trees (`copy_file`, `copy_tree`).
pub mod copy;
/// Contains basic file I/O operations (`ensure_dir_exists`, `write_string_to_file`, `list_files`, ...).
pub mod io;
