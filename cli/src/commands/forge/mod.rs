//! # pforge Forge Command
//!
//! File: cli/src/commands/forge/mod.rs
//!
//! ## Overview
//!
//! Implements `pforge forge`, which creates a new project directory from a
//! template of the store, and `pforge forge --list`, which shows what the store
//! holds.
//!
//! ## Examples
//!
//! ```bash
//! # New project ./my-app from the `base` template
//! pforge forge my-app
//!
//! # From `fastapi`, under ~/work, with only the `fastapi` AI docs
//! pforge forge my-api -t fastapi -d ~/work --ai-docs fastapi
//!
//! # What templates are there?
//! pforge forge --list
//! ```
//!
//! The process exits non-zero when the template does not exist or the project
//! directory already exists. In both cases nothing is written.
//!
use crate::common::ui::{self, Status};
use crate::core::config;
use crate::core::error::Result;
use crate::core::forge::{AiDocsForge, Forge, ForgeOptions, ForgeReport, Generated};
use crate::core::store::TemplateStore;
use anyhow::Context;
use clap::Parser;
use std::env;
use std::path::{Path, PathBuf};
use tracing::info;

mod list;

/// Arguments for `pforge forge`.
#[derive(Parser, Debug)]
pub struct ForgeArgs {
    /// Name of the project directory to create.
    #[arg(required_unless_present = "list")]
    pub project_name: Option<String>,

    /// Template to create the project from.
    #[arg(short = 't', long = "template", default_value = "base")]
    pub template: String,

    /// Directory in which the project directory is created. Default: current directory.
    #[arg(short = 'd', long = "destination")]
    pub destination: Option<PathBuf>,

    /// List available templates and AI doc categories, then exit.
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Do not copy AI docs into the project.
    #[arg(long = "no-ai-docs", conflicts_with = "ai_docs")]
    pub no_ai_docs: bool,

    /// Only copy these AI doc categories. Default: all categories.
    #[arg(long = "ai-docs", num_args = 1..)]
    pub ai_docs: Option<Vec<String>>,

    /// Directories to create in the project. Default: `[forge] dirs` (src tests docs PRPs).
    #[arg(long = "dirs", num_args = 1..)]
    pub dirs: Option<Vec<PathBuf>>,
}

impl ForgeArgs {
    fn options(&self) -> ForgeOptions {
        ForgeOptions {
            include_ai_docs: !self.no_ai_docs,
            ai_docs_categories: self.ai_docs.clone(),
            extra_dirs: self.dirs.clone(),
        }
    }
}

/// Handles `pforge forge`.
///
/// `root_override` is the global `--root` / `PFORGE_ROOT` value, if given.
pub fn handle_forge(args: ForgeArgs, root_override: Option<&Path>) -> Result<()> {
    let cfg = config::load_config().context("Failed to load pforge configuration")?;
    let store = TemplateStore::new(cfg.store_root(root_override));

    if args.list {
        return list::handle_list(&store);
    }

    let project_name = args
        .project_name
        .as_deref()
        .context("A project name is required unless --list is given")?;
    info!(
        "Handling forge command for project '{}' (template '{}')",
        project_name, args.template
    );

    let cwd = env::current_dir().context("Failed to get current directory")?;
    let destination = match &args.destination {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => cwd.join(dir),
        None => cwd.clone(),
    };

    let forge = Forge::new(store, cfg.forge);
    println!("🔨 Forging '{}' from template '{}'", project_name, args.template);
    let report = forge.forge(project_name, &args.template, &destination, &args.options())?;
    print_report(&report);
    print_next_steps(&report.project_dir, &cwd);
    Ok(())
}

fn print_report(report: &ForgeReport) {
    ui::print_status(
        1,
        Status::Ok,
        &format!("{} template file(s) copied", report.template_files.len()),
    );

    match &report.ai_docs {
        AiDocsForge::Disabled => ui::print_status(1, Status::Skipped, "AI docs skipped (--no-ai-docs)"),
        AiDocsForge::NoSources { missing } => {
            ui::print_status(1, Status::Missing, "No AI docs in the store");
            print_missing_categories(missing);
        }
        AiDocsForge::Copied { missing, .. } => {
            ui::print_status(
                1,
                Status::Ok,
                &format!("{} AI doc file(s) copied", report.ai_docs_copied()),
            );
            print_missing_categories(missing);
        }
    }

    for dir in &report.dirs {
        let status = if dir.created { Status::Ok } else { Status::Kept };
        ui::print_status(1, status, &format!("{}/", dir.path.display()));
    }

    for (name, generated) in [(".gitignore", report.gitignore), ("README.md", report.readme)] {
        match generated {
            Generated::Created => ui::print_status(1, Status::Ok, &format!("{} generated", name)),
            Generated::KeptExisting => {
                ui::print_status(1, Status::Kept, &format!("{} kept from template", name))
            }
        }
    }

    println!(
        "\n✅ Project created successfully from template '{}'!\n   Location: {}",
        report.template_name,
        report.project_dir.display()
    );
}

fn print_missing_categories(missing: &[String]) {
    for category in missing {
        ui::print_status(
            2,
            Status::Missing,
            &format!("AI docs category '{}' not found", category),
        );
    }
}

fn print_next_steps(project_dir: &Path, cwd: &Path) {
    let display_path = pathdiff::diff_paths(project_dir, cwd)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| project_dir.display().to_string());

    println!("\nNext steps:");
    println!("  1. Navigate to your project: cd {}", display_path);
    println!("  2. Review and customize CLAUDE.md");
    println!("  3. Start coding with Claude Code");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_defaults() {
        let args = ForgeArgs::try_parse_from(["forge", "my-app"]).unwrap();
        assert_eq!(args.project_name.as_deref(), Some("my-app"));
        assert_eq!(args.template, "base");
        assert!(args.destination.is_none());
        assert!(!args.list);

        let options = args.options();
        assert!(options.include_ai_docs);
        assert!(options.ai_docs_categories.is_none());
        assert!(options.extra_dirs.is_none());
    }

    #[test]
    fn test_list_does_not_need_project_name() {
        let args = ForgeArgs::try_parse_from(["forge", "--list"]).unwrap();
        assert!(args.list);
        assert!(args.project_name.is_none());
        assert!(ForgeArgs::try_parse_from(["forge"]).is_err());
    }

    #[test]
    fn test_parses_lists() {
        let args = ForgeArgs::try_parse_from([
            "forge",
            "p1",
            "--ai-docs",
            "general",
            "fastapi",
            "--dirs",
            "app",
            "scripts",
        ])
        .unwrap();
        assert_eq!(
            args.ai_docs,
            Some(vec!["general".to_string(), "fastapi".to_string()])
        );
        assert_eq!(
            args.dirs,
            Some(vec![PathBuf::from("app"), PathBuf::from("scripts")])
        );
    }

    #[test]
    fn test_no_ai_docs_conflicts_with_categories() {
        assert!(
            ForgeArgs::try_parse_from(["forge", "p1", "--no-ai-docs", "--ai-docs", "general"])
                .is_err()
        );
    }
}
