//! # pforge Harvest Command
//!
//! File: cli/src/commands/harvest/mod.rs
//!
//! ## Overview
//!
//! Implements `pforge harvest`, which copies the well-known Claude Code files,
//! slash commands, PRP templates and AI docs of an existing project into a named
//! template of the store.
//!
//! ## Examples
//!
//! ```bash
//! # Refresh the `base` template from a project
//! pforge harvest ~/code/my-service
//!
//! # Only two commands, into a `fastapi` template, docs filed under `fastapi`
//! pforge harvest ~/code/api -t fastapi -c prime.md review.md --ai-docs-subdir fastapi
//! ```
//!
//! The process exits non-zero only when the source project is missing (or a
//! name is invalid, or a copy fails). Missing optional files are reported and
//! skipped.
//!
use crate::common::ui::{self, Status};
use crate::core::catalog::CLAUDE_MD;
use crate::core::config;
use crate::core::error::Result;
use crate::core::harvest::{AiDocsHarvest, HarvestOptions, HarvestReport, Harvester};
use crate::core::store::TemplateStore;
use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

/// Arguments for `pforge harvest`.
#[derive(Parser, Debug)]
pub struct HarvestArgs {
    /// Path of the project to harvest from.
    pub source: PathBuf,

    /// Template to create or refresh.
    #[arg(short = 't', long = "template", default_value = "base")]
    pub template: String,

    /// Only harvest these command files (e.g. `prime.md`). Default: all commands.
    #[arg(short = 'c', long = "commands", num_args = 1..)]
    pub commands: Option<Vec<String>>,

    /// Do not copy AI docs into the store.
    #[arg(long = "no-ai-docs")]
    pub no_ai_docs: bool,

    /// AI doc category receiving the harvested docs.
    #[arg(long = "ai-docs-subdir", default_value = "general")]
    pub ai_docs_subdir: String,
}

impl HarvestArgs {
    fn options(&self) -> HarvestOptions {
        HarvestOptions {
            commands_filter: self.commands.clone(),
            include_ai_docs: !self.no_ai_docs,
            ai_docs_subdir: self.ai_docs_subdir.clone(),
        }
    }
}

/// Handles `pforge harvest`.
///
/// `root_override` is the global `--root` / `PFORGE_ROOT` value, if given.
pub fn handle_harvest(args: HarvestArgs, root_override: Option<&Path>) -> Result<()> {
    info!("Handling harvest command for {:?}", args.source);
    let cfg = config::load_config().context("Failed to load pforge configuration")?;
    let store = TemplateStore::new(cfg.store_root(root_override));
    let harvester = Harvester::new(store, cfg.catalog);

    let report = harvester.harvest(&args.source, &args.template, &args.options())?;
    print_report(&report, &args.template);
    Ok(())
}

fn print_report(report: &HarvestReport, template: &str) {
    println!("🔍 Harvested from: {}", report.source.display());
    println!("📁 Template: {}", report.template_dir.display());

    ui::print_heading("Core files");
    for outcome in &report.files {
        let label = outcome.path.display().to_string();
        let message = if outcome.copied {
            label
        } else {
            format!("{} (not found)", label)
        };
        ui::print_status(1, Status::from_found(outcome.copied), &message);
    }

    ui::print_heading("Commands");
    let commands = &report.commands;
    for copied in &commands.copied {
        ui::print_status(1, Status::Ok, &copied.display().to_string());
    }
    for missing in &commands.missing {
        ui::print_status(1, Status::Missing, &format!("{} (not found)", missing));
    }
    if !commands.dir_found && commands.missing.is_empty() {
        ui::print_status(1, Status::Missing, "No commands directory found");
    }

    ui::print_heading("Collections");
    for collection in &report.collections {
        let label = collection.path.display().to_string();
        if collection.found {
            ui::print_status(
                1,
                Status::Ok,
                &format!("{} ({} file(s))", label, collection.copied.len()),
            );
        } else {
            ui::print_status(1, Status::Missing, &format!("{} (not found)", label));
        }
    }

    ui::print_heading("AI docs");
    match &report.ai_docs {
        AiDocsHarvest::Disabled => ui::print_status(1, Status::Skipped, "Skipped (--no-ai-docs)"),
        AiDocsHarvest::NotFound => ui::print_status(1, Status::Missing, "No AI docs directory found"),
        AiDocsHarvest::Copied {
            source,
            category,
            files,
        } => ui::print_status(
            1,
            Status::Ok,
            &format!(
                "{} -> ai_docs_sources/{} ({} file(s))",
                source.display(),
                category,
                files.len()
            ),
        ),
    }

    println!("\n✨ Harvest complete for template '{}'", template);
    println!("   Commands: {}", report.commands_copied());
    println!("   PRP templates: {}", report.collection_files_copied());
    println!("   AI docs: {}", report.ai_docs_copied());
    if !report.was_copied(CLAUDE_MD) {
        println!(
            "\n⚠️  No {} was harvested; projects forged from '{}' will not have one.",
            CLAUDE_MD, template
        );
    }
}
