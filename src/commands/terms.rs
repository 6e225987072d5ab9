//! `gloss terms` - list the term paragraphs a document contains

use std::path::Path;
use std::time::Instant;

use crate::cli::{Cli, OutputFormat};
use gloss_core::document::{Document, TextDocument};
use gloss_core::error::Result;
use gloss_core::terms::extract_terms;

pub fn run(cli: &Cli, file: &Path, start: Instant) -> Result<()> {
    let doc = TextDocument::load(file)?;
    let paragraphs: Vec<&str> = (0..doc.len()).map(|i| doc.text(i)).collect();
    let terms = extract_terms(paragraphs);

    tracing::debug!(elapsed = ?start.elapsed(), terms = terms.len(), "terms");

    match cli.format {
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "file": file,
                "terms": terms,
            });
            println!("{}", payload);
        }
        OutputFormat::Human => {
            for term in &terms {
                println!("{}", term);
            }
            if terms.is_empty() && !cli.quiet {
                eprintln!("no terms found in {}", file.display());
            }
        }
    }

    Ok(())
}
