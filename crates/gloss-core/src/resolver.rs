//! Definition resolution against the MediaWiki API
//!
//! Resolving a term is a two-step lookup: a full-text search for page ids,
//! then an intro extract for the first id. Only the first page id is ever
//! consumed; the parser still collects all of them in encounter order so a
//! later version can choose among them.
//!
//! Anything that fails to produce a usable definition - empty search
//! results, malformed JSON, missing fields, a disambiguation page -
//! collapses into the sentinel text rather than an error. Only transport
//! failures propagate.

use regex::Regex;
use serde_json::Value;

use crate::cache::Cache;
use crate::error::Result;
use crate::fetch::{CachingFetch, Fetch};
use crate::formatter::format_extract;

/// Sentinel marking a term whose definition could not be resolved.
pub const NOT_FOUND: &str = "COULD NOT FIND DEFINITION :(";

/// Default MediaWiki API entry point.
pub const DEFAULT_API_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";

/// One term paired with its resolved definition text (or the sentinel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub term: String,
    pub text: String,
}

impl Definition {
    pub fn is_resolved(&self) -> bool {
        self.text != NOT_FOUND
    }

    fn not_found(term: &str) -> Self {
        Self {
            term: term.to_string(),
            text: NOT_FOUND.to_string(),
        }
    }
}

/// Resolves terms through a caching fetch against a MediaWiki endpoint.
pub struct Resolver<'a> {
    endpoint: String,
    fetch: CachingFetch<'a>,
}

impl<'a> Resolver<'a> {
    pub fn new(
        endpoint: &str,
        transport: &'a dyn Fetch,
        cache: &'a dyn Cache,
        use_cache: bool,
        ttl_seconds: u64,
    ) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            fetch: CachingFetch::new(transport, cache, use_cache, ttl_seconds),
        }
    }

    /// Resolve a term to a definition. Returns `Err` only on transport
    /// failure; every resolution dead end becomes the sentinel.
    pub fn resolve(&self, term: &str) -> Result<Definition> {
        let normalized = normalize_term(term);
        if normalized.is_empty() {
            return Ok(Definition::not_found(term));
        }

        let search_url = format!(
            "{}?action=query&format=json&list=search&utf8=1&srsearch={}&origin=*",
            self.endpoint, normalized
        );
        let search_body = self.fetch.fetch(&search_url, &normalized)?;

        let page_ids = parse_page_ids(&search_body);
        let Some(page_id) = page_ids.first() else {
            tracing::debug!(term, "no_search_results");
            return Ok(Definition::not_found(term));
        };

        let extract_url = format!(
            "{}?action=query&format=json&prop=extracts&pageids={}&utf8=1&exsentences=10&exintro=1&explaintext=1&exsectionformat=plain&origin=*",
            self.endpoint, page_id
        );
        let extract_body = self.fetch.fetch(&extract_url, page_id)?;

        let raw = parse_extract(&extract_body).unwrap_or_default();
        let formatted = format_extract(&raw);
        let text = check_dead_end(formatted, term);

        Ok(Definition {
            term: term.to_string(),
            text,
        })
    }
}

/// Normalize a term for the search query: lowercase, whitespace to `%20`,
/// then strip leading non-alphanumeric characters. The order matters -
/// leading whitespace is encoded first, so only the `%` of a leading
/// `%20` is stripped; the digits survive ("  Rust" becomes "20%20rust").
pub fn normalize_term(term: &str) -> String {
    let lowered = term.to_lowercase();
    let encoded: String = lowered
        .chars()
        .map(|c| {
            if c.is_whitespace() {
                "%20".to_string()
            } else {
                c.to_string()
            }
        })
        .collect();
    encoded
        .trim_start_matches(|c: char| !c.is_ascii_alphanumeric())
        .to_string()
}

/// Collect every `pageid` under `query.search` in encounter order.
fn parse_page_ids(body: &str) -> Vec<String> {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return Vec::new();
    };
    let Some(results) = value
        .get("query")
        .and_then(|q| q.get("search"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    let mut page_ids = Vec::new();
    for result in results {
        let Some(object) = result.as_object() else {
            continue;
        };
        for (key, field) in object {
            if key != "pageid" {
                continue;
            }
            match field {
                Value::Number(n) => page_ids.push(n.to_string()),
                Value::String(s) => page_ids.push(s.clone()),
                _ => {}
            }
        }
    }

    page_ids
}

/// Pull `query.pages.<first id>.extract` out of an extract response.
fn parse_extract(body: &str) -> Option<String> {
    let value = serde_json::from_str::<Value>(body).ok()?;
    let pages = value.get("query")?.get("pages")?.as_object()?;
    let (_, page) = pages.iter().next()?;
    page.get("extract")?.as_str().map(|s| s.to_string())
}

/// Replace disambiguation notices ("<term> may refer to" phrasing) and
/// empty extracts with the sentinel.
fn check_dead_end(extract: String, term: &str) -> String {
    if extract.is_empty() {
        return NOT_FOUND.to_string();
    }

    let escaped = regex::escape(term);
    let pattern = format!(
        r"(?i){term} may refer to|{term}\sor\s.*may refer to",
        term = escaped
    );
    match Regex::new(&pattern) {
        Ok(re) if re.is_match(&extract) => NOT_FOUND.to_string(),
        _ => extract,
    }
}
