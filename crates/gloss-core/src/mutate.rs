//! Document mutation: the "add definitions" run
//!
//! Orchestration over the other modules: find term paragraphs, resolve
//! every term in document order, rewrite each paragraph to
//! `"term: definition"`, then re-scan to bold unresolved definitions and
//! italicize paragraphs with little text after their label.
//!
//! All definitions are resolved before any paragraph is rewritten, so a
//! transport failure mid-resolution leaves the document untouched.

use std::sync::OnceLock;

use regex::Regex;

use crate::document::Document;
use crate::error::Result;
use crate::resolver::{Definition, Resolver, NOT_FOUND};
use crate::terms::{is_term_paragraph, term_from_paragraph};

/// Paragraphs with at most this many words after the label are flagged.
pub const WARNING_COUNT: usize = 5;

static NOT_FOUND_RE: OnceLock<Regex> = OnceLock::new();

fn not_found_re() -> &'static Regex {
    NOT_FOUND_RE.get_or_init(|| {
        Regex::new(&format!("(?i){}", regex::escape(NOT_FOUND)))
            .expect("sentinel pattern is valid")
    })
}

/// Run a full mutation pass over the document. Returns the definitions in
/// extraction order. Running again on the mutated document is a no-op for
/// text: rewritten paragraphs no longer end in a bare colon.
pub fn add_definitions(
    doc: &mut dyn Document,
    resolver: &Resolver,
    warning_count: usize,
) -> Result<Vec<Definition>> {
    let mut targets: Vec<(usize, String)> = Vec::new();
    for index in 0..doc.len() {
        let text = doc.text(index);
        if is_term_paragraph(text) {
            targets.push((index, term_from_paragraph(text)));
        }
    }
    tracing::debug!(terms = targets.len(), "terms_extracted");

    let mut definitions = Vec::with_capacity(targets.len());
    for (_, term) in &targets {
        definitions.push(resolver.resolve(term)?);
    }

    for ((index, term), definition) in targets.iter().zip(&definitions) {
        doc.set_text(*index, &format!("{}: {}", term, definition.text));
    }

    for index in 0..doc.len() {
        if not_found_re().is_match(doc.text(index)) {
            doc.set_bold(index, true);
        }
    }

    for index in 0..doc.len() {
        if label_word_count(doc.text(index)) <= warning_count {
            doc.set_italic(index, true);
        }
    }

    Ok(definitions)
}

/// Count the whitespace characters with no colon anywhere after them.
///
/// This is the original warning heuristic preserved literally: it counts
/// matched whitespace occurrences after the last colon (or all whitespace
/// when there is no colon), not words. A paragraph with no whitespace at
/// all counts zero and is therefore always flagged.
pub fn label_word_count(text: &str) -> usize {
    let last_colon = text.rfind(':');
    text.char_indices()
        .filter(|(index, c)| {
            c.is_whitespace() && last_colon.map_or(true, |colon| *index > colon)
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::document::TextDocument;
    use crate::error::GlossError;
    use crate::fetch::Fetch;

    struct FakeApi {
        search_body: String,
        extract_body: String,
    }

    impl Fetch for FakeApi {
        fn get(&self, url: &str) -> Result<String> {
            if url.contains("list=search") {
                Ok(self.search_body.clone())
            } else {
                Ok(self.extract_body.clone())
            }
        }
    }

    fn found_api() -> FakeApi {
        FakeApi {
            search_body: r#"{"query":{"search":[{"pageid":42}]}}"#.to_string(),
            extract_body:
                r#"{"query":{"pages":{"42":{"extract":"A fruit of the apple tree (Malus domestica). More text."}}}}"#
                    .to_string(),
        }
    }

    fn missing_api() -> FakeApi {
        FakeApi {
            search_body: r#"{"query":{"search":[]}}"#.to_string(),
            extract_body: "{}".to_string(),
        }
    }

    #[test]
    fn test_rewrites_term_paragraphs_in_order() {
        let mut doc = TextDocument::from_content("Apple:\nNot a term\nBanana :  \n");
        let api = found_api();
        let cache = MemoryCache::new();
        let resolver = Resolver::new("https://wiki.test/api", &api, &cache, false, 0);

        let definitions = add_definitions(&mut doc, &resolver, WARNING_COUNT).unwrap();

        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].term, "Apple");
        assert_eq!(definitions[1].term, "Banana ");
        assert_eq!(doc.text(0), "Apple: A fruit of the apple tree.");
        assert_eq!(doc.text(1), "Not a term");
        assert_eq!(doc.text(2), "Banana : A fruit of the apple tree.");
    }

    #[test]
    fn test_unresolved_definition_is_bolded() {
        let mut doc = TextDocument::from_content("Xyzzy:\n");
        let api = missing_api();
        let cache = MemoryCache::new();
        let resolver = Resolver::new("https://wiki.test/api", &api, &cache, false, 0);

        add_definitions(&mut doc, &resolver, WARNING_COUNT).unwrap();

        assert_eq!(doc.text(0), format!("Xyzzy: {}", NOT_FOUND));
        // Bold, and italic too: nothing but the sentinel follows the label.
        assert_eq!(doc.render(), format!("***Xyzzy: {}***\n", NOT_FOUND));
    }

    #[test]
    fn test_short_paragraphs_are_italicized() {
        let mut doc = TextDocument::from_content("Apple:\nNot a term\n");
        let api = found_api();
        let cache = MemoryCache::new();
        let resolver = Resolver::new("https://wiki.test/api", &api, &cache, false, 0);

        add_definitions(&mut doc, &resolver, WARNING_COUNT).unwrap();

        // Six words after the label clears the threshold of five.
        let rendered = doc.render();
        assert!(rendered.starts_with("Apple: A fruit"));
        // "Not a term" has no colon, so every whitespace counts: two,
        // which is under the threshold.
        assert!(rendered.contains("*Not a term*"));
    }

    #[test]
    fn test_mutation_is_idempotent() {
        let mut doc = TextDocument::from_content("Apple:\nNot a term\n");
        let api = found_api();
        let cache = MemoryCache::new();
        let resolver = Resolver::new("https://wiki.test/api", &api, &cache, false, 0);

        add_definitions(&mut doc, &resolver, WARNING_COUNT).unwrap();
        let first = doc.render();

        let mut doc = TextDocument::from_content(&first);
        let definitions = add_definitions(&mut doc, &resolver, WARNING_COUNT).unwrap();

        assert!(definitions.is_empty());
        assert_eq!(doc.render(), first);
    }

    #[test]
    fn test_transport_failure_leaves_document_untouched() {
        struct FailingApi;
        impl Fetch for FailingApi {
            fn get(&self, _url: &str) -> Result<String> {
                Err(GlossError::Http("connection refused".into()))
            }
        }

        let mut doc = TextDocument::from_content("Apple:\nBanana:\n");
        let cache = MemoryCache::new();
        let resolver = Resolver::new("https://wiki.test/api", &FailingApi, &cache, false, 0);

        let err = add_definitions(&mut doc, &resolver, WARNING_COUNT).unwrap_err();
        assert!(matches!(err, GlossError::Http(_)));
        assert_eq!(doc.render(), "Apple:\nBanana:\n");
    }

    #[test]
    fn test_label_word_count() {
        // Whitespace after the last colon.
        assert_eq!(label_word_count("Apple: A fruit of the tree."), 5);
        // No colon: all whitespace counts.
        assert_eq!(label_word_count("Not a term"), 2);
        // No whitespace at all.
        assert_eq!(label_word_count("word"), 0);
        assert_eq!(label_word_count(""), 0);
        // Whitespace before the last colon is excluded.
        assert_eq!(label_word_count("a b c: d e"), 2);
    }
}
