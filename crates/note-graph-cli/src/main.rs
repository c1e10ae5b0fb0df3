//! note-graph CLI - explore link relationships inside a Markdown note vault.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use note_graph_core::Depth;
use tracing::Level;

mod commands;
mod config;

use commands::graph::OutputFormat;
use config::Config;

/// note-graph CLI - build and render link graphs around a note.
///
/// Point it at a vault (a directory of Markdown notes with `[[wikilinks]]`)
/// and it discovers outgoing links and backlinks up to a chosen depth.
#[derive(Parser, Debug)]
#[command(
    name = "ng",
    author,
    version,
    about = "note-graph: link graphs for Markdown note vaults",
    long_about = None
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the link graph around a note and emit it as JSON or SVG.
    Graph {
        /// Root note: a vault-relative path or a bare note name.
        root: String,

        /// Vault directory (defaults to the configured vault).
        #[arg(long)]
        vault: Option<PathBuf>,

        /// Link depth to expand: 1 (direct links), 2 or 3.
        #[arg(short, long)]
        depth: Option<Depth>,

        /// Output format: json (graph + layout) or svg (rendered scene).
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,

        /// Write the document to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List a note's outgoing links, backlinks, and attachments.
    Links {
        /// Note: a vault-relative path or a bare note name.
        root: String,

        /// Vault directory (defaults to the configured vault).
        #[arg(long)]
        vault: Option<PathBuf>,
    },

    /// Show vault-wide link statistics.
    Stats {
        /// Vault directory (defaults to the configured vault).
        #[arg(long)]
        vault: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()?;

    match cli.command {
        Commands::Graph {
            root,
            vault,
            depth,
            format,
            output,
        } => {
            commands::graph::execute(&config, &root, vault, depth, format, output)?;
        }

        Commands::Links { root, vault } => {
            commands::links::execute(&config, &root, vault)?;
        }

        Commands::Stats { vault } => {
            commands::stats::execute(&config, vault)?;
        }
    }

    Ok(())
}
