//! # pforge Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared helpers used by the core operations and the command handlers.
//!
//! - **`fs`**: Filesystem operations (copying with metadata, directory creation, file listing).
//! - **`ui`**: Status lines and headings for the terminal reports.
//!

/// Utilities for filesystem operations (copying, I/O).
pub mod fs;
/// Terminal output helpers for reports.
pub mod ui;
