//! # pforge UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Small formatting helpers for the reports printed by `pforge harvest` and
//! `pforge forge`: a status marker per item and a section heading. Formatting
//! (`status_line`, `heading`) is kept separate from printing so it can be
//! unit-tested.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::ui::{self, Status};
//!
//! ui::print_heading("Core files");
//! ui::print_status(1, Status::Ok, "CLAUDE.md");
//! ui::print_status(1, Status::Missing, ".mcp.json (not found)");
//! ```
//!

/// Outcome marker shown in front of a report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The item was copied or created.
    Ok,
    /// The item already existed and was left as is.
    Kept,
    /// An optional item was absent.
    Missing,
    /// The step was skipped on request.
    Skipped,
}

impl Status {
    pub fn marker(self) -> &'static str {
        match self {
            Status::Ok => "✅",
            Status::Kept => "➖",
            Status::Missing => "⚠️ ",
            Status::Skipped => "⏭️ ",
        }
    }

    /// `Ok` when `done`, `Missing` otherwise.
    pub fn from_found(done: bool) -> Self {
        if done {
            Status::Ok
        } else {
            Status::Missing
        }
    }
}

/// Formats one report line, indented by `indent` levels of two spaces.
pub fn status_line(indent: usize, status: Status, message: &str) -> String {
    format!("{}{} {}", "  ".repeat(indent), status.marker(), message)
}

/// Formats a section heading.
pub fn heading(title: &str) -> String {
    format!("\n{}:", title)
}

pub fn print_status(indent: usize, status: Status, message: &str) {
    println!("{}", status_line(indent, status, message));
}

pub fn print_heading(title: &str) {
    println!("{}", heading(title));
}
