//! # pforge Path Catalog
//!
//! File: cli/src/core/catalog.rs
//!
//! ## Overview
//!
//! The path catalog is the ordered list of relative paths that `pforge harvest`
//! looks for inside a source project. It is a plain value handed to the
//! `Harvester` at construction, so tests and the `[catalog]` configuration
//! section can replace any part of it.
//!
//! ## Default Catalog
//!
//! | Kind                | Paths                                                   |
//! |---------------------|---------------------------------------------------------|
//! | Well-known files    | `CLAUDE.md`, `.claude/settings.local.json`, `.mcp.json`, `.gitignore` |
//! | Commands directory  | `.claude/commands`                                      |
//! | Collections         | `PRPs/templates`                                        |
//! | AI docs candidates  | `PRPs/ai_docs`, `ai_docs`, `docs/ai` (first match wins) |
//!
use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

/// Project instructions file.
pub const CLAUDE_MD: &str = "CLAUDE.md";
/// Local Claude Code settings.
pub const SETTINGS: &str = ".claude/settings.local.json";
/// MCP server configuration.
pub const MCP_CONFIG: &str = ".mcp.json";
/// Git ignore rules.
pub const GITIGNORE: &str = ".gitignore";
/// Directory holding slash commands.
pub const COMMANDS_DIR: &str = ".claude/commands";
/// Directory holding PRP templates.
pub const PRP_TEMPLATES_DIR: &str = "PRPs/templates";

/// The set of relative paths harvested from a source project.
///
/// All paths are relative to the source project root and map to the same
/// relative path inside the template, except the AI docs directory, which is
/// redirected into the shared `ai_docs_sources/<category>/` area of the store.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PathCatalog {
    /// Single files (or directories) copied as-is when present.
    pub files: Vec<PathBuf>,
    /// Directory whose files are harvested individually and may be filtered by name.
    pub commands_dir: PathBuf,
    /// Directories whose files are all copied when present.
    pub collections: Vec<PathBuf>,
    /// Candidate AI docs directories, in priority order.
    pub ai_docs_candidates: Vec<PathBuf>,
}

impl Default for PathCatalog {
    fn default() -> Self {
        Self {
            files: vec![
                PathBuf::from(CLAUDE_MD),
                PathBuf::from(SETTINGS),
                PathBuf::from(MCP_CONFIG),
                PathBuf::from(GITIGNORE),
            ],
            commands_dir: PathBuf::from(COMMANDS_DIR),
            collections: vec![PathBuf::from(PRP_TEMPLATES_DIR)],
            ai_docs_candidates: vec![
                PathBuf::from("PRPs/ai_docs"),
                PathBuf::from("ai_docs"),
                PathBuf::from("docs/ai"),
            ],
        }
    }
}

impl PathCatalog {
    /// Returns the first catalog path that is not a plain relative path, if any.
    pub fn find_invalid_path(&self) -> Option<&Path> {
        self.files
            .iter()
            .chain(std::iter::once(&self.commands_dir))
            .chain(self.collections.iter())
            .chain(self.ai_docs_candidates.iter())
            .map(PathBuf::as_path)
            .find(|path| !is_plain_relative(path))
    }

    /// Resolves the AI docs source: the first candidate that is a directory under `source_root`.
    pub fn locate_ai_docs(&self, source_root: &Path) -> Option<PathBuf> {
        self.ai_docs_candidates
            .iter()
            .find(|candidate| source_root.join(candidate).is_dir())
            .cloned()
    }
}

/// True if `path` is non-empty and made only of normal components.
///
/// Rejects absolute paths, `.` and `..`, so a joined path can never escape the
/// directory it is joined onto.
pub fn is_plain_relative(path: &Path) -> bool {
    let mut components = path.components().peekable();
    components.peek().is_some() && components.all(|c| matches!(c, Component::Normal(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = PathCatalog::default();
        assert_eq!(catalog.find_invalid_path(), None);
        assert_eq!(catalog.files.len(), 4);
        assert_eq!(catalog.ai_docs_candidates[0], PathBuf::from("PRPs/ai_docs"));
    }

    #[test]
    fn test_is_plain_relative() {
        assert!(is_plain_relative(Path::new("CLAUDE.md")));
        assert!(is_plain_relative(Path::new(".claude/commands")));
        assert!(!is_plain_relative(Path::new("")));
        assert!(!is_plain_relative(Path::new("/etc/passwd")));
        assert!(!is_plain_relative(Path::new("../outside")));
        assert!(!is_plain_relative(Path::new("docs/../../x")));
    }

    #[test]
    fn test_find_invalid_path_reports_offender() {
        let catalog = PathCatalog {
            collections: vec![PathBuf::from("../escape")],
            ..PathCatalog::default()
        };
        assert_eq!(catalog.find_invalid_path(), Some(Path::new("../escape")));
    }

    #[test]
    fn test_locate_ai_docs_honors_priority() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        assert_eq!(PathCatalog::default().locate_ai_docs(root), None);

        fs::create_dir_all(root.join("docs/ai")).unwrap();
        assert_eq!(
            PathCatalog::default().locate_ai_docs(root),
            Some(PathBuf::from("docs/ai"))
        );

        fs::create_dir_all(root.join("PRPs/ai_docs")).unwrap();
        assert_eq!(
            PathCatalog::default().locate_ai_docs(root),
            Some(PathBuf::from("PRPs/ai_docs"))
        );
    }

    #[test]
    fn test_locate_ai_docs_ignores_plain_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("ai_docs"), "not a directory").unwrap();
        assert_eq!(PathCatalog::default().locate_ai_docs(dir.path()), None);
    }

    #[test]
    fn test_deserialize_partial_override() {
        let catalog: PathCatalog = toml::from_str(r#"ai_docs_candidates = ["reference"]"#).unwrap();
        assert_eq!(catalog.ai_docs_candidates, vec![PathBuf::from("reference")]);
        assert_eq!(catalog.files, PathCatalog::default().files);
    }
}
