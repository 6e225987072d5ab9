//! Term extraction from document paragraphs
//!
//! A term paragraph is one whose text ends in a colon, optionally followed
//! by whitespace ("Term:", "Banana :  "). The term is the trimmed text with
//! the final colon removed.

use std::sync::OnceLock;

use regex::Regex;

static TERM_RE: OnceLock<Regex> = OnceLock::new();

fn term_re() -> &'static Regex {
    TERM_RE.get_or_init(|| Regex::new(r":\s*$").expect("term pattern is valid"))
}

/// Whether a paragraph qualifies as a term entry (trailing colon plus
/// optional whitespace).
pub fn is_term_paragraph(text: &str) -> bool {
    term_re().is_match(text)
}

/// Convert a qualifying paragraph into its term: trim, then drop the final
/// character (the colon). Trimming happens first, so interior whitespace
/// before the colon survives ("Banana :" becomes "Banana "). Text that
/// trims to nothing yields an empty term.
pub fn term_from_paragraph(text: &str) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().last() {
        Some((last, _)) => trimmed[..last].to_string(),
        None => String::new(),
    }
}

/// Extract terms from paragraphs in document order.
pub fn extract_terms<'a, I>(paragraphs: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    paragraphs
        .into_iter()
        .filter(|p| is_term_paragraph(p))
        .map(term_from_paragraph)
        .collect()
}
