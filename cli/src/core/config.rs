//! # pforge Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates the pforge configuration: where the
//! template store lives, which paths harvest looks for, and which directories
//! forge creates.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. The global `--root` flag / `PFORGE_ROOT` (store root only, applied by `Config::store_root`)
//! 2. Project-specific `.pforge.toml` in the current directory or an ancestor
//!    (the search stops at a directory containing `.git`)
//! 3. User-specific `<config dir>/pforge/config.toml`
//! 4. Default values defined in the code
//!
//! Both files are merged key by key before deserializing: any key set in the
//! project file replaces the user value, even when it equals the default.
//!
//! ## Example
//!
//! ```toml
//! [store]
//! root = "~/work/pforge-store"
//!
//! [catalog]
//! ai_docs_candidates = ["reference", "docs/ai"]
//!
//! [forge]
//! dirs = ["src", "tests"]
//! ```
//!
use crate::common::fs::io;
use crate::core::catalog::{is_plain_relative, PathCatalog};
use crate::core::error::{ForgeError, Result};
use crate::core::forge::ForgeSettings;
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const PROJECT_CONFIG_FILENAME: &str = ".pforge.toml";
const USER_CONFIG_FILENAME: &str = "config.toml";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub catalog: PathCatalog,
    #[serde(default)]
    pub forge: ForgeSettings,
}

/// Location of the template store.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Store root (can use ~). Will be expanded.
    #[serde(default = "default_store_root")]
    pub root: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: default_store_root(),
        }
    }
}

fn default_store_root() -> String {
    "~/.config/pforge".to_string()
}

impl Config {
    /// The effective store root: the command-line override if given, else `[store] root`.
    pub fn store_root(&self, override_root: Option<&Path>) -> PathBuf {
        match override_root {
            Some(root) => {
                debug!("Using store root from command line: {:?}", root);
                PathBuf::from(shellexpand::tilde(&root.to_string_lossy()).into_owned())
            }
            None => PathBuf::from(&self.store.root),
        }
    }
}

/// Loads the merged configuration for the current working directory.
pub fn load_config() -> Result<Config> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    load_config_from(user_config_path().as_deref(), &current_dir)
}

/// Loads, merges, expands and validates the configuration.
///
/// `user_config` is the user file location (absent when no config directory
/// can be determined); `start_dir` is where the project file search begins.
pub fn load_config_from(user_config: Option<&Path>, start_dir: &Path) -> Result<Config> {
    let mut merged = match user_config {
        Some(path) if path.is_file() => {
            info!("Loading user configuration from: {}", path.display());
            load_table_from_path(path)?
        }
        Some(path) => {
            debug!("User configuration file not found at {}", path.display());
            toml::Table::new()
        }
        None => toml::Table::new(),
    };

    match find_project_config_path(start_dir) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            merge_tables(&mut merged, load_table_from_path(&path)?);
        }
        None => {
            debug!(
                "No project configuration file ({}) found in {} or ancestors.",
                PROJECT_CONFIG_FILENAME,
                start_dir.display()
            );
        }
    }

    let mut config: Config = toml::Value::Table(merged)
        .try_into()
        .context("Failed to build configuration from merged files")?;
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn user_config_path() -> Option<PathBuf> {
    match ProjectDirs::from("dev", "pforge", "pforge") {
        Some(proj_dirs) => Some(proj_dirs.config_dir().join(USER_CONFIG_FILENAME)),
        None => {
            warn!("Could not determine user config directory.");
            None
        }
    }
}

fn find_project_config_path(start_dir: &Path) -> Option<PathBuf> {
    let mut path = start_dir;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

/// Parses one configuration file into a raw table.
///
/// The table is also checked against `Config` on its own, so an unknown key
/// or a wrongly typed value is reported against the file that holds it.
fn load_table_from_path(path: &Path) -> Result<toml::Table> {
    let content = io::read_file_to_string(path)?;
    let table: toml::Table = toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))?;
    toml::Value::Table(table.clone())
        .try_into::<Config>()
        .with_context(|| format!("Invalid configuration in file: {}", path.display()))?;
    Ok(table)
}

/// Overlays `overlay` onto `base`: nested tables merge key by key, any other
/// value set in `overlay` replaces the one in `base`.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(incoming) => match base.get_mut(&key) {
                Some(toml::Value::Table(existing)) => merge_tables(existing, incoming),
                _ => {
                    base.insert(key, toml::Value::Table(incoming));
                }
            },
            other => {
                base.insert(key, other);
            }
        }
    }
}

fn expand_config_paths(config: &mut Config) {
    config.store.root = shellexpand::tilde(&config.store.root).into_owned();
    debug!("Expanded store root: {}", config.store.root);
}

fn validate_config(config: &Config) -> Result<()> {
    let root = PathBuf::from(&config.store.root);
    if root.as_os_str().is_empty() {
        return Err(anyhow!(ForgeError::Config(
            "Store root cannot be empty.".to_string()
        )));
    }
    if root.exists() && !root.is_dir() {
        return Err(anyhow!(ForgeError::Config(format!(
            "Configured store root '{}' exists but is not a directory.",
            root.display()
        ))));
    }
    if let Some(bad) = config.catalog.find_invalid_path() {
        return Err(anyhow!(ForgeError::Config(format!(
            "Catalog path '{}' must be relative and must not contain '..'.",
            bad.display()
        ))));
    }
    if let Some(bad) = config.forge.dirs.iter().find(|d| !is_plain_relative(d)) {
        return Err(anyhow!(ForgeError::Config(format!(
            "Forge directory '{}' must be a non-empty relative path without '..'.",
            bad.display()
        ))));
    }
    if !is_plain_relative(&config.forge.ai_docs_dir) {
        return Err(anyhow!(ForgeError::Config(format!(
            "Forge ai_docs_dir '{}' must be a non-empty relative path without '..'.",
            config.forge.ai_docs_dir.display()
        ))));
    }
    debug!("Configuration validation successful.");
    Ok(())
}
