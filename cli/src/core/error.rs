//! # pforge Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout pforge. Only a handful of
//! failures are "typed": the precondition failures that abort an operation before
//! anything is written, plus configuration and filesystem shape problems.
//! Everything else (an I/O error halfway through a copy) travels as an
//! `anyhow::Error` carrying the offending path as context.
//!
//! ## Architecture
//!
//! - `ForgeError`: A custom error enum using `thiserror` for the precondition failures
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! ## Examples
//!
//! ```rust
//! // Raise a typed precondition error
//! if !source.is_dir() {
//!     anyhow::bail!(ForgeError::SourceNotFound { path: source.to_path_buf() });
//! }
//!
//! // Recover it higher up (tests do this)
//! let is_missing_template = err
//!     .downcast_ref::<ForgeError>()
//!     .map_or(false, |fe| matches!(fe, ForgeError::TemplateNotFound { .. }));
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for pforge.
#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("Source project does not exist or is not a directory: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Template '{name}' not found. Available templates: {}", format_available(available))]
    TemplateNotFound { name: String, available: Vec<String> },

    #[error("Project directory already exists: {}", path.display())]
    DestinationExists { path: PathBuf },

    #[error("Project directory {} is inside the template store {}", path.display(), store.display())]
    DestinationInsideStore { path: PathBuf, store: PathBuf },

    #[error("Invalid {kind} '{name}': must be a single, non-empty directory name")]
    InvalidName { kind: &'static str, name: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },

    #[error("Filesystem error: {0}")]
    FileSystem(String),
}

fn format_available(available: &[String]) -> String {
    if available.is_empty() {
        "(none)".to_string()
    } else {
        available.join(", ")
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
/// Anyhow allows for easy context addition and flexible error handling.
pub type Result<T> = anyhow::Result<T>;
