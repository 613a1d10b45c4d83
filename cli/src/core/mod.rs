//! # pforge Core
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the pieces that implement pforge's behavior, independent
//! of the command line:
//! - `catalog`: The ordered list of paths harvest looks for
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and the crate-wide `Result`
//! - `forge`: Creating a project from a template
//! - `harvest`: Capturing a project's configuration into a template
//! - `store`: Layout and listing of the template store
//! - `templating`: Rendering of the generated `.gitignore` and `README.md`
//!
//! Every operation returns a structured report; printing is left to `commands`.
//!
pub mod catalog;
pub mod config;
pub mod error;
pub mod forge;
pub mod harvest;
pub mod store;
pub mod templating;
