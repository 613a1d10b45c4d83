//! # pforge Harvester
//!
//! File: cli/src/core/harvest.rs
//!
//! ## Overview
//!
//! The harvester populates (or refreshes) one named template from one existing
//! project. It walks the `PathCatalog` against the source project, copies
//! whatever it finds into `templates/<name>/`, and sends the AI docs to the
//! shared `ai_docs_sources/<category>/` area of the store.
//!
//! ## Rules
//!
//! - The only hard precondition is that the source project is an existing
//!   directory (`ForgeError::SourceNotFound`). Names are validated before
//!   anything is written (`ForgeError::InvalidName`).
//! - Every catalog entry is independent. A missing entry is recorded in the
//!   report and harvesting continues.
//! - Writes are additive and overwrite silently: harvesting again refreshes the
//!   template in place, without diffing or backups.
//! - An I/O error during a copy aborts the harvest. Files already copied stay.
//!
//! Nothing is printed here; the command layer renders the returned
//! `HarvestReport`.
//!
use crate::common::fs::{copy, io};
use crate::core::catalog::{is_plain_relative, PathCatalog};
use crate::core::error::{ForgeError, Result};
use crate::core::store::{validate_name, TemplateStore};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Caller-chosen knobs for a single harvest.
#[derive(Debug, Clone)]
pub struct HarvestOptions {
    /// Restrict commands to these filenames (relative to the commands directory).
    pub commands_filter: Option<Vec<String>>,
    /// Copy AI docs into the store at all.
    pub include_ai_docs: bool,
    /// Category under `ai_docs_sources/` receiving the AI docs.
    pub ai_docs_subdir: String,
}

impl Default for HarvestOptions {
    fn default() -> Self {
        Self {
            commands_filter: None,
            include_ai_docs: true,
            ai_docs_subdir: "general".to_string(),
        }
    }
}

/// Outcome for one single-file catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub copied: bool,
}

/// Outcome for the commands directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandsOutcome {
    /// Whether the source project has a commands directory at all.
    pub dir_found: bool,
    /// Copied command files, relative to the commands directory.
    pub copied: Vec<PathBuf>,
    /// Requested (filtered) commands that were not found.
    pub missing: Vec<String>,
}

/// Outcome for one collection directory (e.g. `PRPs/templates`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionOutcome {
    pub path: PathBuf,
    pub found: bool,
    /// Copied files, relative to the collection directory.
    pub copied: Vec<PathBuf>,
}

/// Outcome for the AI docs step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiDocsHarvest {
    /// Skipped on request.
    Disabled,
    /// None of the candidate directories exist in the source project.
    NotFound,
    /// Docs copied from `source` (relative to the project) into `category`.
    Copied {
        source: PathBuf,
        category: String,
        files: Vec<PathBuf>,
    },
}

/// Structured result of a harvest run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestReport {
    /// Canonical path of the source project.
    pub source: PathBuf,
    /// Template directory that received the files.
    pub template_dir: PathBuf,
    pub files: Vec<FileOutcome>,
    pub commands: CommandsOutcome,
    pub collections: Vec<CollectionOutcome>,
    pub ai_docs: AiDocsHarvest,
}

impl HarvestReport {
    /// Whether the single-file catalog entry at `path` was copied.
    pub fn was_copied(&self, path: impl AsRef<Path>) -> bool {
        self.files
            .iter()
            .any(|outcome| outcome.copied && outcome.path == path.as_ref())
    }

    pub fn commands_copied(&self) -> usize {
        self.commands.copied.len()
    }

    pub fn collection_files_copied(&self) -> usize {
        self.collections.iter().map(|c| c.copied.len()).sum()
    }

    pub fn ai_docs_copied(&self) -> usize {
        match &self.ai_docs {
            AiDocsHarvest::Copied { files, .. } => files.len(),
            _ => 0,
        }
    }
}

/// Copies catalog entries from source projects into a template store.
#[derive(Debug, Clone)]
pub struct Harvester {
    store: TemplateStore,
    catalog: PathCatalog,
}

impl Harvester {
    pub fn new(store: TemplateStore, catalog: PathCatalog) -> Self {
        Self { store, catalog }
    }

    /// Harvests `source` into the template `template_name`.
    ///
    /// # Errors
    ///
    /// - `ForgeError::InvalidName` for a bad template name, AI docs category or
    ///   command filter entry (checked before anything is written).
    /// - `ForgeError::SourceNotFound` if `source` is not an existing directory.
    /// - Any I/O error raised while copying, with the paths involved as context.
    pub fn harvest(
        &self,
        source: &Path,
        template_name: &str,
        options: &HarvestOptions,
    ) -> Result<HarvestReport> {
        let template_dir = self.store.template_path(template_name)?;
        if options.include_ai_docs {
            validate_name("AI docs category", &options.ai_docs_subdir)?;
        }
        if let Some(filter) = &options.commands_filter {
            if let Some(bad) = filter.iter().find(|name| !is_plain_relative(Path::new(name))) {
                anyhow::bail!(ForgeError::InvalidName {
                    kind: "command name",
                    name: bad.clone(),
                });
            }
        }
        if !source.is_dir() {
            anyhow::bail!(ForgeError::SourceNotFound {
                path: source.to_path_buf()
            });
        }
        let source = source
            .canonicalize()
            .with_context(|| format!("Failed to resolve source project {:?}", source))?;

        info!(
            "Harvesting from {:?} into template '{}' ({:?})",
            source, template_name, template_dir
        );

        let files = self.harvest_files(&source, &template_dir)?;
        let commands =
            self.harvest_commands(&source, &template_dir, options.commands_filter.as_deref())?;
        let collections = self.harvest_collections(&source, &template_dir)?;
        let ai_docs = if options.include_ai_docs {
            self.harvest_ai_docs(&source, &options.ai_docs_subdir)?
        } else {
            debug!("AI docs harvesting disabled");
            AiDocsHarvest::Disabled
        };

        Ok(HarvestReport {
            source,
            template_dir,
            files,
            commands,
            collections,
            ai_docs,
        })
    }

    fn harvest_files(&self, source: &Path, template_dir: &Path) -> Result<Vec<FileOutcome>> {
        let mut outcomes = Vec::with_capacity(self.catalog.files.len());
        for relative in &self.catalog.files {
            let from = source.join(relative);
            let to = template_dir.join(relative);
            let copied = if from.is_file() {
                copy::copy_file(&from, &to)?;
                true
            } else if from.is_dir() {
                copy::copy_tree(&from, &to)?;
                true
            } else {
                warn!("No {} found in source project", relative.display());
                false
            };
            outcomes.push(FileOutcome {
                path: relative.clone(),
                copied,
            });
        }
        Ok(outcomes)
    }

    fn harvest_commands(
        &self,
        source: &Path,
        template_dir: &Path,
        filter: Option<&[String]>,
    ) -> Result<CommandsOutcome> {
        let from_dir = source.join(&self.catalog.commands_dir);
        let to_dir = template_dir.join(&self.catalog.commands_dir);
        let mut outcome = CommandsOutcome {
            dir_found: from_dir.is_dir(),
            ..CommandsOutcome::default()
        };

        match filter {
            Some(names) => {
                for name in names {
                    let from = from_dir.join(name);
                    if outcome.dir_found && from.is_file() {
                        copy::copy_file(&from, &to_dir.join(name))?;
                        outcome.copied.push(PathBuf::from(name));
                    } else {
                        warn!("Command not found: {}", name);
                        outcome.missing.push(name.clone());
                    }
                }
            }
            None if outcome.dir_found => {
                for relative in io::list_files(&from_dir)? {
                    copy::copy_file(&from_dir.join(&relative), &to_dir.join(&relative))?;
                    outcome.copied.push(relative);
                }
            }
            None => warn!("No {} directory found", self.catalog.commands_dir.display()),
        }

        debug!("Harvested {} command(s)", outcome.copied.len());
        Ok(outcome)
    }

    fn harvest_collections(
        &self,
        source: &Path,
        template_dir: &Path,
    ) -> Result<Vec<CollectionOutcome>> {
        let mut outcomes = Vec::with_capacity(self.catalog.collections.len());
        for relative in &self.catalog.collections {
            let from_dir = source.join(relative);
            if !from_dir.is_dir() {
                warn!("No {} directory found", relative.display());
                outcomes.push(CollectionOutcome {
                    path: relative.clone(),
                    found: false,
                    copied: Vec::new(),
                });
                continue;
            }

            let to_dir = template_dir.join(relative);
            let mut copied = Vec::new();
            for file in io::list_files(&from_dir)? {
                copy::copy_file(&from_dir.join(&file), &to_dir.join(&file))?;
                copied.push(file);
            }
            outcomes.push(CollectionOutcome {
                path: relative.clone(),
                found: true,
                copied,
            });
        }
        Ok(outcomes)
    }

    fn harvest_ai_docs(&self, source: &Path, category: &str) -> Result<AiDocsHarvest> {
        let Some(relative) = self.catalog.locate_ai_docs(source) else {
            warn!("No AI docs directory found");
            return Ok(AiDocsHarvest::NotFound);
        };

        let to_dir = self.store.ai_docs_category_path(category)?;
        let from_dir = source.join(&relative);
        info!("Copying AI docs from {:?} into {:?}", from_dir, to_dir);

        let mut files = Vec::new();
        for file in io::list_files(&from_dir)? {
            copy::copy_file(&from_dir.join(&file), &to_dir.join(&file))?;
            files.push(file);
        }
        Ok(AiDocsHarvest::Copied {
            source: relative,
            category: category.to_string(),
            files,
        })
    }
}
