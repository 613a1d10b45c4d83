//! # pforge Template Store
//!
//! File: cli/src/core/store.rs
//!
//! ## Overview
//!
//! The template store is the on-disk location shared by harvest (writer) and
//! forge (reader). It has no behavior of its own beyond resolving paths and
//! answering "what is in here", which is all the template listing needs.
//!
//! ## Layout
//!
//! ```text
//! <root>/templates/<template-name>/...     mirrors a source project's structure
//! <root>/ai_docs_sources/<category>/...    reference docs, independent of templates
//! ```
//!
//! There is no manifest: the contents of a template are whatever its directory
//! holds right now.
//!
use crate::common::fs::io;
use crate::core::error::{ForgeError, Result};
use anyhow::Context;
use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Directory (under the store root) holding one subdirectory per template.
pub const TEMPLATES_DIR: &str = "templates";
/// Directory (under the store root) holding one subdirectory per AI doc category.
pub const AI_DOCS_SOURCES_DIR: &str = "ai_docs_sources";

/// A named entry of the store (template or AI doc category) and its recursive file count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEntry {
    pub name: String,
    pub file_count: usize,
}

/// Handle on a template store rooted at a directory.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    root: PathBuf,
}

impl TemplateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root.join(TEMPLATES_DIR)
    }

    pub fn ai_docs_dir(&self) -> PathBuf {
        self.root.join(AI_DOCS_SOURCES_DIR)
    }

    /// Path of the named template. The name is validated; existence is not checked.
    pub fn template_path(&self, name: &str) -> Result<PathBuf> {
        validate_name("template name", name)?;
        Ok(self.templates_dir().join(name))
    }

    /// Path of the named AI doc category. The name is validated; existence is not checked.
    pub fn ai_docs_category_path(&self, category: &str) -> Result<PathBuf> {
        validate_name("AI docs category", category)?;
        Ok(self.ai_docs_dir().join(category))
    }

    /// Lists every template with its recursive file count, sorted by name.
    ///
    /// A store without a `templates/` directory simply has no templates.
    pub fn list_templates(&self) -> Result<Vec<StoreEntry>> {
        list_entries(&self.templates_dir())
    }

    /// Lists every AI doc category with its recursive file count, sorted by name.
    pub fn list_ai_doc_categories(&self) -> Result<Vec<StoreEntry>> {
        list_entries(&self.ai_docs_dir())
    }

    /// Template names only, sorted. Used for "did you mean" style error messages.
    pub fn template_names(&self) -> Result<Vec<String>> {
        subdirectory_names(&self.templates_dir())
    }
}

/// Checks that `name` can be used as exactly one directory name.
///
/// Empty names, `.`/`..`, absolute paths and anything containing a path
/// separator are rejected with `ForgeError::InvalidName`.
pub fn validate_name(kind: &'static str, name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    let valid = match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) => part == OsStr::new(name),
        _ => false,
    };
    if !valid {
        anyhow::bail!(ForgeError::InvalidName {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}

fn subdirectory_names(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        debug!("Store directory {:?} does not exist yet", dir);
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory {:?}", dir))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read an entry of {:?}", dir))?;
        if entry.path().is_dir() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    names.sort();
    Ok(names)
}

fn list_entries(dir: &Path) -> Result<Vec<StoreEntry>> {
    subdirectory_names(dir)?
        .into_iter()
        .map(|name| {
            let file_count = io::count_files(&dir.join(&name))?;
            Ok(StoreEntry { name, file_count })
        })
        .collect()
}
