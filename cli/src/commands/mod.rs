//! # pforge Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the pforge CLI. Each command
//! defines its own Clap arguments struct and a handler that loads configuration,
//! runs the matching core operation and prints its report.
//!
//! ## Commands
//!
//! - `harvest`: Capture a project's Claude Code configuration into a template
//! - `forge`: Create a new project from a template (or list templates with `--list`)
//!

/// `pforge harvest <source>`: copies catalog files from a project into a template.
pub mod harvest;
/// `pforge forge <name>`: creates a project from a template. Includes the `--list` view.
pub mod forge;
