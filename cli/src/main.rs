//! # pforge Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the pforge CLI, a scaffolding
//! tool for Claude Code projects. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the `harvest` and `forge` handlers
//!
//! ## Examples
//!
//! ```bash
//! # Capture a project's setup into the `base` template
//! pforge harvest ~/code/my-service
//!
//! # Start a new project from it, with debug logging
//! pforge -vv forge my-app
//!
//! # Use a store somewhere else
//! pforge --root /srv/pforge forge --list
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level (`RUST_LOG` wins when set)
//! 3. Route to the command handler
//! 4. Print any error with its context chain and exit with status 1
//!
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod common;
mod core;

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "pforge",
    about = "🔨 pforge: Harvest Claude Code setups into templates and forge new projects from them",
    long_about = "Copy CLAUDE.md, commands, PRP templates and AI docs from an existing project\n\
                  into a named template, then create new projects from that template.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Template store root. Overrides `[store] root` from the configuration.
    #[arg(long, global = true, env = "PFORGE_ROOT")]
    root: Option<PathBuf>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Copy a project's Claude Code files into a template.
    #[command(alias = "h")]
    Harvest(commands::harvest::HarvestArgs),
    /// Create a new project from a template.
    #[command(alias = "f")]
    Forge(commands::forge::ForgeArgs),
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let root = cli.root.as_deref();
    let command_result = match cli.command {
        Commands::Harvest(args) => commands::harvest::handle_harvest(args, root),
        Commands::Forge(args) => commands::forge::handle_forge(args, root),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
