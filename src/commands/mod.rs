//! Command dispatch and shared command plumbing for gloss

mod define;
mod lookup;
mod terms;

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use crate::cli::{Cli, Commands};
use gloss_core::cache::{Cache, FileCache, MemoryCache};
use gloss_core::config::GlossConfig;
use gloss_core::error::Result;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    match &cli.command {
        None => handle_no_command(),

        Some(Commands::Define { file, dry_run }) => define::run(cli, file, *dry_run, start),

        Some(Commands::Lookup { term }) => lookup::run(cli, term, start),

        Some(Commands::Terms { file }) => terms::run(cli, file, start),
    }
}

fn handle_no_command() -> Result<()> {
    println!("gloss - replace term paragraphs with fetched definitions");
    println!();
    println!("Usage: gloss <COMMAND>");
    println!();
    println!("Commands:");
    println!("  define <FILE>   Replace \"Term:\" paragraphs with definitions");
    println!("  lookup <TERM>   Resolve a single term and print its definition");
    println!("  terms <FILE>    List the term paragraphs a document contains");
    println!();
    println!("Run 'gloss --help' for all options.");
    Ok(())
}

/// Load config, honoring `--config` and `--cache-dir` overrides.
pub fn load_config(cli: &Cli) -> Result<GlossConfig> {
    let mut config = match &cli.config {
        Some(path) => GlossConfig::load(path)?,
        None => {
            let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            GlossConfig::load_or_default(&cwd)?
        }
    };

    if let Some(dir) = &cli.cache_dir {
        config.cache_dir = Some(dir.clone());
    }

    Ok(config)
}

/// Build the response cache. `--no-cache` swaps in a throwaway in-memory
/// store so no cache directory is created.
pub fn open_cache(cli: &Cli, config: &GlossConfig) -> Result<Box<dyn Cache>> {
    if cli.no_cache {
        Ok(Box::new(MemoryCache::new()))
    } else {
        Ok(Box::new(FileCache::open(&config.cache_dir())?))
    }
}
