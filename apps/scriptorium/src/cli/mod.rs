//! # Scriptorium CLI Module
//!
//! This module implements the CLI interface for Scriptorium.
//!
//! ## Available Commands
//!
//! - `build` - Build the static site (the default command)
//! - `check` - Validate the data without building
//! - `stats` - Show dataset and index statistics

mod commands;

use crate::config::{SiteConfig, normalize_base_path};
use clap::{Parser, Subcommand};
use scriptorium_core::ScriptoriumError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Scriptorium - static corpus-site builder
///
/// Turns four JSON record collections (manuscripts, spells, categories,
/// spell-category links) into a cross-linked static HTML site.
#[derive(Parser, Debug)]
#[command(name = "scriptorium")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the site configuration file
    #[arg(short, long, global = true, default_value = "scriptorium.toml")]
    pub config: PathBuf,

    /// Override the configured data directory
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Override the configured output directory
    #[arg(long, global = true)]
    pub out_dir: Option<PathBuf>,

    /// Override the configured link prefix (e.g. "/corpus")
    #[arg(long, global = true)]
    pub base_path: Option<String>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the static site
    Build {
        /// Remove generated HTML before building (avoids stale pages)
        #[arg(long)]
        clean: bool,

        /// Print the validation report during the build
        #[arg(long)]
        validate: bool,

        /// Fail the build on any validation error (implies --validate)
        #[arg(long)]
        strict: bool,
    },

    /// Validate the data without building
    Check {
        /// Exit non-zero if validation errors are found
        #[arg(long)]
        strict: bool,
    },

    /// Show dataset and index statistics
    Stats,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Resolve the effective configuration: file first, CLI overrides second.
fn resolve_config(cli: &Cli) -> Result<SiteConfig, ScriptoriumError> {
    let mut config = SiteConfig::load(&cli.config)?;
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(out_dir) = &cli.out_dir {
        config.out_dir = out_dir.clone();
    }
    if let Some(base_path) = &cli.base_path {
        config.base_path = normalize_base_path(base_path);
    }
    Ok(config)
}

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), ScriptoriumError> {
    let config = resolve_config(&cli)?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Build {
            clean,
            validate,
            strict,
        }) => cmd_build(&config, clean, validate, strict),
        Some(Commands::Check { strict }) => cmd_check(&config, strict, json_mode),
        Some(Commands::Stats) => cmd_stats(&config, json_mode),
        // No subcommand - plain build by default
        None => cmd_build(&config, false, false, false),
    }
}

// =============================================================================
// TESTS
// =============================================================================
