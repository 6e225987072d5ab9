//! `gloss lookup` - resolve one term and print its definition

use std::time::Instant;

use crate::cli::{Cli, OutputFormat};
use crate::commands::{load_config, open_cache};
use gloss_core::error::Result;
use gloss_core::fetch::HttpFetch;
use gloss_core::resolver::Resolver;

pub fn run(cli: &Cli, term: &str, start: Instant) -> Result<()> {
    let config = load_config(cli)?;

    let http = HttpFetch::new();
    let cache = open_cache(cli, &config)?;
    let resolver = Resolver::new(
        &config.api_endpoint,
        &http,
        cache.as_ref(),
        !cli.no_cache,
        config.ttl_seconds(),
    );

    let definition = resolver.resolve(term)?;

    tracing::debug!(elapsed = ?start.elapsed(), term, resolved = definition.is_resolved(), "lookup");

    match cli.format {
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "term": definition.term,
                "definition": definition.text,
                "resolved": definition.is_resolved(),
            });
            println!("{}", payload);
        }
        OutputFormat::Human => {
            println!("{}: {}", definition.term, definition.text);
        }
    }

    Ok(())
}
