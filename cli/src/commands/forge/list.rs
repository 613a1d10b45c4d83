//! # pforge Template Listing
//!
//! File: cli/src/commands/forge/list.rs
//!
//! ## Overview
//!
//! Implements `pforge forge --list`: prints every template of the store with its
//! file count, followed by the AI doc categories that `--ai-docs` can select.
//!
//! Example output:
//!
//! ```text
//! 📚 Available templates in '/home/user/.config/pforge/templates':
//!
//!   base       3 file(s)
//!   fastapi    5 file(s)
//!
//! 📖 AI doc categories:
//!
//!   general    2 file(s)
//! ```
//!
use crate::core::error::Result;
use crate::core::store::{StoreEntry, TemplateStore};
use tracing::debug;

/// Prints templates and AI doc categories of `store`.
pub fn handle_list(store: &TemplateStore) -> Result<()> {
    debug!("Listing templates in {:?}", store.root());
    let templates = store.list_templates()?;
    let categories = store.list_ai_doc_categories()?;

    if templates.is_empty() {
        println!(
            "\nNo templates found in '{}'.",
            store.templates_dir().display()
        );
        println!("Create one with 'pforge harvest <project-path> --template <name>'.");
    } else {
        println!(
            "\n📚 Available templates in '{}':\n",
            store.templates_dir().display()
        );
        for line in format_entries(&templates) {
            println!("{}", line);
        }
    }

    if !categories.is_empty() {
        println!("\n📖 AI doc categories:\n");
        for line in format_entries(&categories) {
            println!("{}", line);
        }
    }
    Ok(())
}

/// One aligned `name  N file(s)` line per entry.
fn format_entries(entries: &[StoreEntry]) -> Vec<String> {
    let name_width = entries
        .iter()
        .map(|entry| entry.name.len())
        .max()
        .unwrap_or(10)
        .clamp(10, 30);
    entries
        .iter()
        .map(|entry| {
            format!(
                "  {:<width$} {} file(s)",
                entry.name,
                entry.file_count,
                width = name_width
            )
        })
        .collect()
}
