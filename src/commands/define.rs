//! `gloss define` - run the mutation pass over a document

use std::path::Path;
use std::time::Instant;

use crate::cli::{Cli, OutputFormat};
use crate::commands::{load_config, open_cache};
use gloss_core::document::TextDocument;
use gloss_core::error::Result;
use gloss_core::fetch::HttpFetch;
use gloss_core::mutate::add_definitions;
use gloss_core::resolver::Resolver;

pub fn run(cli: &Cli, file: &Path, dry_run: bool, start: Instant) -> Result<()> {
    let config = load_config(cli)?;
    let mut doc = TextDocument::load(file)?;

    let http = HttpFetch::new();
    let cache = open_cache(cli, &config)?;
    let resolver = Resolver::new(
        &config.api_endpoint,
        &http,
        cache.as_ref(),
        !cli.no_cache,
        config.ttl_seconds(),
    );

    let definitions = add_definitions(&mut doc, &resolver, config.warning_count)?;
    let unresolved = definitions.iter().filter(|d| !d.is_resolved()).count();

    if dry_run {
        print!("{}", doc.render());
    } else {
        doc.save(file)?;
    }

    tracing::debug!(elapsed = ?start.elapsed(), terms = definitions.len(), unresolved, "define");

    match cli.format {
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "file": file,
                "dry_run": dry_run,
                "definitions": definitions
                    .iter()
                    .map(|d| {
                        serde_json::json!({
                            "term": d.term,
                            "definition": d.text,
                            "resolved": d.is_resolved(),
                        })
                    })
                    .collect::<Vec<_>>(),
            });
            println!("{}", payload);
        }
        OutputFormat::Human => {
            if !cli.quiet && !dry_run {
                println!(
                    "Added {} definition(s) to {} ({} not found)",
                    definitions.len(),
                    file.display(),
                    unresolved
                );
            }
        }
    }

    Ok(())
}
