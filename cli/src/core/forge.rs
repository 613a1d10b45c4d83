//! # pforge Project Forge
//!
//! File: cli/src/core/forge.rs
//!
//! ## Overview
//!
//! Forge materializes a new project directory from a named template: it copies
//! every file of the template, copies the selected AI doc categories, creates
//! the standard directory skeleton and generates `.gitignore` / `README.md`
//! when the template did not provide them.
//!
//! ## Rules
//!
//! Preconditions are checked in a fixed order and nothing is written until all
//! of them pass:
//! 1. Names (project, template, AI doc categories, extra dirs) are valid.
//! 2. The template exists (`ForgeError::TemplateNotFound`, listing the
//!    templates that do exist).
//! 3. The destination project directory does not exist
//!    (`ForgeError::DestinationExists`). Forge never merges into an existing
//!    directory.
//! 4. The project directory is outside the template store
//!    (`ForgeError::DestinationInsideStore`). Forge only reads the store.
//!
//! After that, any I/O error aborts the run with the failing path in the
//! message. Files copied up to that point are left in place.
//!
use crate::common::fs::{copy, io};
use crate::core::catalog::is_plain_relative;
use crate::core::error::{ForgeError, Result};
use crate::core::store::{validate_name, TemplateStore};
use crate::core::templating::{self, BoilerplateContext};
use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Generated file names.
const GITIGNORE_FILE: &str = ".gitignore";
const README_FILE: &str = "README.md";

/// Project layout settings (the `[forge]` configuration section).
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ForgeSettings {
    /// Directories created in every new project.
    pub dirs: Vec<PathBuf>,
    /// Directory (inside the new project) receiving AI doc categories.
    pub ai_docs_dir: PathBuf,
}

impl Default for ForgeSettings {
    fn default() -> Self {
        Self {
            dirs: ["src", "tests", "docs", "PRPs"]
                .into_iter()
                .map(PathBuf::from)
                .collect(),
            ai_docs_dir: PathBuf::from("ai_docs"),
        }
    }
}

/// Caller-chosen knobs for a single forge run.
#[derive(Debug, Clone)]
pub struct ForgeOptions {
    pub include_ai_docs: bool,
    /// Only these categories; `None` copies every category in the store.
    pub ai_docs_categories: Option<Vec<String>>,
    /// Skeleton directories; `None` uses `ForgeSettings::dirs`.
    pub extra_dirs: Option<Vec<PathBuf>>,
}

impl Default for ForgeOptions {
    fn default() -> Self {
        Self {
            include_ai_docs: true,
            ai_docs_categories: None,
            extra_dirs: None,
        }
    }
}

/// Outcome of the AI docs step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiDocsForge {
    /// Skipped on request.
    Disabled,
    /// The store has no `ai_docs_sources/` directory. `missing` holds the
    /// explicitly requested categories, all of which are absent.
    NoSources { missing: Vec<String> },
    /// Files copied (relative to the project) and requested categories that were absent.
    Copied {
        files: Vec<PathBuf>,
        missing: Vec<String>,
    },
}

/// Whether a skeleton directory had to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirOutcome {
    pub path: PathBuf,
    pub created: bool,
}

/// What happened to a generated boilerplate file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generated {
    Created,
    /// The template already provided the file; it was left untouched.
    KeptExisting,
}

/// Structured result of a forge run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgeReport {
    pub project_dir: PathBuf,
    pub template_name: String,
    /// Files copied from the template, relative to the project.
    pub template_files: Vec<PathBuf>,
    pub ai_docs: AiDocsForge,
    pub dirs: Vec<DirOutcome>,
    pub gitignore: Generated,
    pub readme: Generated,
}

impl ForgeReport {
    pub fn ai_docs_copied(&self) -> usize {
        match &self.ai_docs {
            AiDocsForge::Copied { files, .. } => files.len(),
            _ => 0,
        }
    }
}

/// Creates new projects from templates held in a `TemplateStore`.
#[derive(Debug, Clone)]
pub struct Forge {
    store: TemplateStore,
    settings: ForgeSettings,
}

impl Forge {
    pub fn new(store: TemplateStore, settings: ForgeSettings) -> Self {
        Self { store, settings }
    }

    /// Forges `destination_dir/project_name` from the template `template_name`.
    ///
    /// # Errors
    ///
    /// - `ForgeError::InvalidName` for a bad project name, template name,
    ///   category or extra directory.
    /// - `ForgeError::TemplateNotFound` if the template does not exist.
    /// - `ForgeError::DestinationExists` if the project directory already exists.
    /// - `ForgeError::DestinationInsideStore` if the project directory would land
    ///   inside the template store.
    /// - Any I/O error raised while copying or generating files.
    pub fn forge(
        &self,
        project_name: &str,
        template_name: &str,
        destination_dir: &Path,
        options: &ForgeOptions,
    ) -> Result<ForgeReport> {
        // --- Preconditions (no writes) ---
        validate_name("project name", project_name)?;
        let template_dir = self.store.template_path(template_name)?;
        if options.include_ai_docs {
            for category in options.ai_docs_categories.iter().flatten() {
                validate_name("AI docs category", category)?;
            }
        }
        let extra_dirs = options
            .extra_dirs
            .as_ref()
            .unwrap_or(&self.settings.dirs);
        if let Some(bad) = extra_dirs.iter().find(|d| !is_plain_relative(d)) {
            anyhow::bail!(ForgeError::InvalidName {
                kind: "project directory",
                name: bad.display().to_string(),
            });
        }

        if !template_dir.is_dir() {
            anyhow::bail!(ForgeError::TemplateNotFound {
                name: template_name.to_string(),
                available: self.store.template_names().unwrap_or_default(),
            });
        }

        let project_dir = destination_dir.join(project_name);
        if fs::symlink_metadata(&project_dir).is_ok() {
            anyhow::bail!(ForgeError::DestinationExists { path: project_dir });
        }
        let store_root = resolve_existing_prefix(self.store.root());
        if resolve_existing_prefix(&project_dir).starts_with(&store_root) {
            anyhow::bail!(ForgeError::DestinationInsideStore {
                path: project_dir,
                store: store_root,
            });
        }

        // --- Writes ---
        info!(
            "Forging project '{}' from template '{}' at {:?}",
            project_name, template_name, project_dir
        );
        fs::create_dir_all(&project_dir)
            .with_context(|| format!("Failed to create project directory {:?}", project_dir))?;

        let template_files = copy::copy_tree(&template_dir, &project_dir)?;
        info!("Copied {} template file(s)", template_files.len());

        let ai_docs = if options.include_ai_docs {
            self.copy_ai_docs(&project_dir, options.ai_docs_categories.as_deref())?
        } else {
            debug!("AI docs copying disabled");
            AiDocsForge::Disabled
        };

        let dirs = create_skeleton(&project_dir, extra_dirs)?;

        let context = BoilerplateContext::new(project_name, template_name);
        let gitignore = generate_if_absent(
            &project_dir.join(GITIGNORE_FILE),
            || templating::render_gitignore(&context),
        )?;
        let readme = generate_if_absent(&project_dir.join(README_FILE), || {
            templating::render_readme(&context)
        })?;

        Ok(ForgeReport {
            project_dir,
            template_name: template_name.to_string(),
            template_files,
            ai_docs,
            dirs,
            gitignore,
            readme,
        })
    }

    fn copy_ai_docs(&self, project_dir: &Path, categories: Option<&[String]>) -> Result<AiDocsForge> {
        let sources = self.store.ai_docs_dir();
        if !sources.is_dir() {
            warn!("No AI docs sources found at {:?}", sources);
            let missing = categories.map(<[String]>::to_vec).unwrap_or_default();
            for category in &missing {
                warn!("AI docs category not found: {}", category);
            }
            return Ok(AiDocsForge::NoSources { missing });
        }

        let selected: Vec<String> = match categories {
            Some(requested) => requested.to_vec(),
            None => self
                .store
                .list_ai_doc_categories()?
                .into_iter()
                .map(|entry| entry.name)
                .collect(),
        };

        let target_root = project_dir.join(&self.settings.ai_docs_dir);
        let mut files = Vec::new();
        let mut missing = Vec::new();
        for category in selected {
            let from = self.store.ai_docs_category_path(&category)?;
            if !from.is_dir() {
                warn!("AI docs category not found: {}", category);
                missing.push(category);
                continue;
            }
            let relative_root = self.settings.ai_docs_dir.join(&category);
            for copied in copy::copy_tree(&from, &target_root.join(&category))? {
                files.push(relative_root.join(copied));
            }
        }

        Ok(AiDocsForge::Copied { files, missing })
    }
}

/// Canonical form of `path`: its deepest existing ancestor is resolved
/// (symlinks included) and the not-yet-existing remainder appended.
fn resolve_existing_prefix(path: &Path) -> PathBuf {
    for ancestor in path.ancestors() {
        if let Ok(resolved) = ancestor.canonicalize() {
            let rest = path.strip_prefix(ancestor).unwrap_or(Path::new(""));
            return resolved.join(rest);
        }
    }
    path.to_path_buf()
}

fn create_skeleton(project_dir: &Path, dirs: &[PathBuf]) -> Result<Vec<DirOutcome>> {
    let mut outcomes = Vec::with_capacity(dirs.len());
    for dir in dirs {
        let path = project_dir.join(dir);
        let created = !path.is_dir();
        io::ensure_dir_exists(&path)?;
        outcomes.push(DirOutcome {
            path: dir.clone(),
            created,
        });
    }
    Ok(outcomes)
}

fn generate_if_absent(
    path: &Path,
    render: impl FnOnce() -> Result<String>,
) -> Result<Generated> {
    if path.exists() {
        debug!("{:?} provided by the template, not generating", path);
        return Ok(Generated::KeptExisting);
    }
    io::write_string_to_file(path, &render()?)?;
    Ok(Generated::Created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// Store with a `base` template and two AI doc categories, plus an empty destination.
    fn setup() -> (TempDir, TempDir, Forge) {
        let store_root = tempdir().unwrap();
        let destination = tempdir().unwrap();
        let store = TemplateStore::new(store_root.path());
        let base = store.templates_dir().join("base");
        write(&base, "CLAUDE.md", "rules");
        write(&base, ".claude/commands/run.md", "run");
        write(&base, "PRPs/templates/prp_base.md", "prp");
        write(&store.ai_docs_dir().join("general"), "intro.md", "intro");
        write(&store.ai_docs_dir().join("fastapi"), "routing/deps.md", "deps");
        let forge = Forge::new(store, ForgeSettings::default());
        (store_root, destination, forge)
    }

    #[test]
    fn test_forge_copies_template_and_generates_files() -> Result<()> {
        let (_store_root, destination, forge) = setup();
        let report = forge.forge("p1", "base", destination.path(), &ForgeOptions::default())?;
        let project = destination.path().join("p1");

        assert_eq!(report.project_dir, project);
        assert_eq!(report.template_files.len(), 3);
        assert_eq!(fs::read_to_string(project.join("CLAUDE.md"))?, "rules");
        assert_eq!(
            fs::read_to_string(project.join(".claude/commands/run.md"))?,
            "run"
        );
        for dir in ["src", "tests", "docs", "PRPs"] {
            assert!(project.join(dir).is_dir(), "missing {}", dir);
        }
        assert!(!project.join(".mcp.json").exists());
        assert_eq!(report.gitignore, Generated::Created);
        assert_eq!(report.readme, Generated::Created);
        assert!(fs::read_to_string(project.join("README.md"))?.starts_with("# p1"));

        let prps = report.dirs.iter().find(|d| d.path == Path::new("PRPs")).unwrap();
        assert!(!prps.created, "PRPs/ came from the template");
        let src = report.dirs.iter().find(|d| d.path == Path::new("src")).unwrap();
        assert!(src.created);
        Ok(())
    }

    #[test]
    fn test_missing_template_fails_before_creating_destination() {
        let (_store_root, destination, forge) = setup();
        let err = forge
            .forge("p1", "nope", destination.path(), &ForgeOptions::default())
            .unwrap_err();
        match err.downcast_ref::<ForgeError>() {
            Some(ForgeError::TemplateNotFound { name, available }) => {
                assert_eq!(name, "nope");
                assert_eq!(available, &vec!["base".to_string()]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(!destination.path().join("p1").exists());
    }

    #[test]
    fn test_existing_destination_is_left_untouched() -> Result<()> {
        let (_store_root, destination, forge) = setup();
        let project = destination.path().join("p1");
        write(&project, "keep.txt", "mine");

        let err = forge
            .forge("p1", "base", destination.path(), &ForgeOptions::default())
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ForgeError>(),
            Some(ForgeError::DestinationExists { .. })
        ));
        assert_eq!(io::list_files(&project)?, vec![PathBuf::from("keep.txt")]);
        Ok(())
    }

    #[test]
    fn test_destination_that_is_a_file_counts_as_existing() {
        let (_store_root, destination, forge) = setup();
        write(destination.path(), "p1", "a file");
        let err = forge
            .forge("p1", "base", destination.path(), &ForgeOptions::default())
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ForgeError>(),
            Some(ForgeError::DestinationExists { .. })
        ));
    }

    #[test]
    fn test_template_gitignore_and_readme_win() -> Result<()> {
        let (store_root, destination, forge) = setup();
        let base = store_root.path().join("templates/base");
        write(&base, ".gitignore", "custom-ignore");
        write(&base, "README.md", "custom readme");

        let report = forge.forge("p1", "base", destination.path(), &ForgeOptions::default())?;
        let project = destination.path().join("p1");
        assert_eq!(report.gitignore, Generated::KeptExisting);
        assert_eq!(report.readme, Generated::KeptExisting);
        assert_eq!(fs::read_to_string(project.join(".gitignore"))?, "custom-ignore");
        assert_eq!(fs::read_to_string(project.join("README.md"))?, "custom readme");
        Ok(())
    }

    #[test]
    fn test_all_ai_doc_categories_by_default() -> Result<()> {
        let (_store_root, destination, forge) = setup();
        let report = forge.forge("p1", "base", destination.path(), &ForgeOptions::default())?;
        assert_eq!(
            report.ai_docs,
            AiDocsForge::Copied {
                files: vec![
                    PathBuf::from("ai_docs/fastapi/routing/deps.md"),
                    PathBuf::from("ai_docs/general/intro.md"),
                ],
                missing: Vec::new(),
            }
        );
        assert!(destination.path().join("p1/ai_docs/general/intro.md").is_file());
        Ok(())
    }

    #[test]
    fn test_selected_ai_doc_categories_only() -> Result<()> {
        let (_store_root, destination, forge) = setup();
        let options = ForgeOptions {
            ai_docs_categories: Some(vec!["fastapi".into(), "rust".into()]),
            ..ForgeOptions::default()
        };
        let report = forge.forge("p1", "base", destination.path(), &options)?;
        let project = destination.path().join("p1");

        assert_eq!(report.ai_docs_copied(), 1);
        assert_eq!(
            report.ai_docs,
            AiDocsForge::Copied {
                files: vec![PathBuf::from("ai_docs/fastapi/routing/deps.md")],
                missing: vec!["rust".to_string()],
            }
        );
        assert!(!project.join("ai_docs/general").exists());
        Ok(())
    }

    #[test]
    fn test_ai_docs_disabled_and_missing_sources() -> Result<()> {
        let (store_root, destination, forge) = setup();
        let disabled = ForgeOptions {
            include_ai_docs: false,
            ..ForgeOptions::default()
        };
        let report = forge.forge("p1", "base", destination.path(), &disabled)?;
        assert_eq!(report.ai_docs, AiDocsForge::Disabled);
        assert!(!destination.path().join("p1/ai_docs").exists());

        fs::remove_dir_all(store_root.path().join("ai_docs_sources"))?;
        let report = forge.forge("p2", "base", destination.path(), &ForgeOptions::default())?;
        assert_eq!(report.ai_docs, AiDocsForge::NoSources { missing: Vec::new() });

        let requested = ForgeOptions {
            ai_docs_categories: Some(vec!["general".into(), "rust".into()]),
            ..ForgeOptions::default()
        };
        let report = forge.forge("p3", "base", destination.path(), &requested)?;
        assert_eq!(
            report.ai_docs,
            AiDocsForge::NoSources {
                missing: vec!["general".to_string(), "rust".to_string()],
            }
        );
        assert_eq!(report.ai_docs_copied(), 0);
        Ok(())
    }

    #[test]
    fn test_destination_inside_template_is_rejected() -> Result<()> {
        let (store_root, _destination, forge) = setup();
        let template = store_root.path().join("templates/base");
        let before = io::list_files(&template)?;

        let err = forge
            .forge("p1", "base", &template, &ForgeOptions::default())
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ForgeError>(),
            Some(ForgeError::DestinationInsideStore { .. })
        ));
        assert!(!template.join("p1").exists());
        assert_eq!(io::list_files(&template)?, before);

        let nested = store_root.path().join("ai_docs_sources/general/not-yet/there");
        let err = forge
            .forge("p1", "base", &nested, &ForgeOptions::default())
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ForgeError>(),
            Some(ForgeError::DestinationInsideStore { .. })
        ));
        assert!(!store_root.path().join("ai_docs_sources/general/not-yet").exists());
        Ok(())
    }

    #[test]
    fn test_custom_extra_dirs() -> Result<()> {
        let (_store_root, destination, forge) = setup();
        let options = ForgeOptions {
            extra_dirs: Some(vec![PathBuf::from("app/core"), PathBuf::from("scripts")]),
            ..ForgeOptions::default()
        };
        let report = forge.forge("p1", "base", destination.path(), &options)?;
        let project = destination.path().join("p1");
        assert!(project.join("app/core").is_dir());
        assert!(project.join("scripts").is_dir());
        assert!(!project.join("tests").exists());
        assert_eq!(report.dirs.len(), 2);
        Ok(())
    }

    #[test]
    fn test_escaping_extra_dir_rejected_before_writing() {
        let (_store_root, destination, forge) = setup();
        let options = ForgeOptions {
            extra_dirs: Some(vec![PathBuf::from("../outside")]),
            ..ForgeOptions::default()
        };
        let err = forge
            .forge("p1", "base", destination.path(), &options)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ForgeError>(),
            Some(ForgeError::InvalidName { .. })
        ));
        assert!(!destination.path().join("p1").exists());
    }

    #[test]
    fn test_destination_parents_are_created() -> Result<()> {
        let (_store_root, destination, forge) = setup();
        let nested = destination.path().join("work/clients");
        forge.forge("p1", "base", &nested, &ForgeOptions::default())?;
        assert!(nested.join("p1/CLAUDE.md").is_file());
        Ok(())
    }
}
