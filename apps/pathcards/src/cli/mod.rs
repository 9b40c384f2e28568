//! # pathcards CLI Module
//!
//! This module implements the CLI interface for pathcards.
//!
//! ## Available Commands
//!
//! - `extract` - Mine a model and write cards (and optionally SIF)
//! - `sif` - Write only the gene-level triple export
//! - `patterns` - List the archetype patterns
//! - `status` - Show model statistics

mod commands;

use crate::config::PathcardsConfig;
use clap::{Parser, Subcommand};
use pathcards_core::PathcardsError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// pathcards - mechanism cards from pathway graphs
///
/// Searches a pathway model for eight mechanism archetypes and writes one
/// grounded JSON card per inferred mechanism.
#[derive(Parser, Debug)]
#[command(name = "pathcards")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mine a model and write the cards
    Extract {
        /// Model document (JSON)
        #[arg(short, long)]
        model: PathBuf,

        /// Output file for the cards
        #[arg(short, long)]
        output: PathBuf,

        /// Also write the SIF triples here
        #[arg(long)]
        sif: Option<PathBuf>,

        /// Blacklist of ubiquitous molecules
        #[arg(short, long)]
        blacklist: Option<PathBuf>,

        /// Archetype to run (repeatable; default all)
        #[arg(short, long = "archetype")]
        archetypes: Vec<String>,

        /// Write compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Write only the SIF triples
    Sif {
        /// Model document (JSON)
        #[arg(short, long)]
        model: PathBuf,

        /// Output file for the triples
        #[arg(short, long)]
        output: PathBuf,

        /// Blacklist of ubiquitous molecules
        #[arg(short, long)]
        blacklist: Option<PathBuf>,
    },

    /// List archetype patterns
    Patterns,

    /// Show model statistics
    Status {
        /// Model document (JSON)
        #[arg(short, long)]
        model: PathBuf,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), PathcardsError> {
    let config = PathcardsConfig::load_optional(cli.config.as_deref())?;
    let json_mode = cli.json_mode;
    if cli.verbose {
        tracing::info!("Config: {:?}", config);
    }

    match cli.command {
        Commands::Extract {
            model,
            output,
            sif,
            blacklist,
            archetypes,
            compact,
        } => {
            let settings = config.resolve(blacklist, &archetypes, compact)?;
            cmd_extract(&settings, &model, &output, sif.as_deref(), json_mode)
        }
        Commands::Sif {
            model,
            output,
            blacklist,
        } => {
            let settings = config.resolve(blacklist, &[], false)?;
            cmd_sif(&settings, &model, &output, json_mode)
        }
        Commands::Patterns => {
            let settings = config.resolve(None, &[], false)?;
            cmd_patterns(&settings, json_mode)
        }
        Commands::Status { model } => cmd_status(&model, json_mode),
    }
}
