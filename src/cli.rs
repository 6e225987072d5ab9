//! CLI argument parsing for gloss
//!
//! Uses clap for argument parsing.
//! Supports global flags: --format, --quiet, --verbose, --log-level,
//! --log-json, --no-cache, --cache-dir, --config

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use gloss_core::format::OutputFormat;

/// Gloss - replace term paragraphs with fetched encyclopedia definitions
#[derive(Parser, Debug)]
#[command(name = "gloss")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (human or json)
    #[arg(long, global = true, default_value = "human", value_parser = parse_output_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report timing and debug detail on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Bypass the response cache entirely
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Cache directory override
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Path to a gloss.toml config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replace term paragraphs in a document with fetched definitions
    Define {
        /// Document to mutate in place
        file: PathBuf,

        /// Print the mutated document to stdout instead of writing it back
        #[arg(long)]
        dry_run: bool,
    },

    /// Resolve a single term and print its definition
    Lookup {
        /// Term to look up
        term: String,
    },

    /// List the term paragraphs a document contains
    Terms {
        /// Document to scan
        file: PathBuf,
    },
}

/// Parse output format from string
fn parse_output_format(s: &str) -> Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}
