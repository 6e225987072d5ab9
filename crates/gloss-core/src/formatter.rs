//! Extract cleanup pipeline
//!
//! Raw MediaWiki extracts arrive with embedded line breaks, trailing
//! sentences, and parenthetical asides. `format_extract` runs an ordered
//! chain of pure text substitutions; the steps are not commutative, so the
//! order here is load-bearing.
//!
//! The API's own sentence limiting treats every period as a sentence end,
//! so "Washington D.C." would be split after "D." - the second-sentence
//! truncation here uses the same heuristic deliberately, keeping behavior
//! aligned with what the API returns.

use std::sync::OnceLock;

use regex::Regex;

static LINE_BREAK_RE: OnceLock<Regex> = OnceLock::new();
static SENTENCE_RE: OnceLock<Regex> = OnceLock::new();
static PAREN_GROUP_RE: OnceLock<Regex> = OnceLock::new();
static STRAY_PAREN_RE: OnceLock<Regex> = OnceLock::new();
static MULTI_SPACE_RE: OnceLock<Regex> = OnceLock::new();
static SPACE_COMMA_RE: OnceLock<Regex> = OnceLock::new();
static SPACE_PERIOD_RE: OnceLock<Regex> = OnceLock::new();

/// Clean a raw extract into a single definition sentence.
pub fn format_extract(raw: &str) -> String {
    let text = strip_line_breaks(raw);
    let text = strip_second_sentence(&text);
    let text = strip_paren_groups(&text);
    let text = strip_stray_parens(&text);
    let text = collapse_whitespace(&text);
    let text = unescape_quotes(&text);
    let text = tighten_commas(&text);
    tighten_periods(&text)
}

/// Drop everything from the first period + escaped `\n` sequence or the
/// first real newline to the end of the string.
fn strip_line_breaks(text: &str) -> String {
    let re = LINE_BREAK_RE
        .get_or_init(|| Regex::new(r"\.\s?\\n.*|\n.*").expect("line break pattern is valid"));
    re.replace_all(text, "").into_owned()
}

/// Drop everything after a period followed by whitespace and a character
/// that is not a lowercase letter, keeping the period. Abbreviations like
/// "D.C." are treated as sentence ends too; that matches the source data.
fn strip_second_sentence(text: &str) -> String {
    let re = SENTENCE_RE
        .get_or_init(|| Regex::new(r"\.\s[^a-z].*").expect("sentence pattern is valid"));
    re.replace(text, ".").into_owned()
}

/// Remove fully-parenthesized groups, innermost first. The number of `(`
/// characters bounds the number of removal passes.
fn strip_paren_groups(text: &str) -> String {
    let re = PAREN_GROUP_RE
        .get_or_init(|| Regex::new(r"\([^)]*\)").expect("paren group pattern is valid"));
    let passes = text.matches('(').count();
    let mut out = text.to_string();
    for _ in 0..passes {
        let next = re.replace_all(&out, "").into_owned();
        if next == out {
            break;
        }
        out = next;
    }
    out
}

/// Remove any unbalanced `(` or `)` left behind.
fn strip_stray_parens(text: &str) -> String {
    let re = STRAY_PAREN_RE.get_or_init(|| Regex::new(r"[()]").expect("paren pattern is valid"));
    re.replace_all(text, "").into_owned()
}

/// Collapse runs of two or more whitespace characters into one space.
fn collapse_whitespace(text: &str) -> String {
    let re = MULTI_SPACE_RE
        .get_or_init(|| Regex::new(r"\s{2,}").expect("whitespace pattern is valid"));
    re.replace_all(text, " ").into_owned()
}

/// Replace escaped double quotes with plain ones.
fn unescape_quotes(text: &str) -> String {
    text.replace("\\\"", "\"")
}

/// Remove whitespace immediately preceding a comma.
fn tighten_commas(text: &str) -> String {
    let re = SPACE_COMMA_RE
        .get_or_init(|| Regex::new(r"\s+,").expect("comma pattern is valid"));
    re.replace_all(text, ",").into_owned()
}

/// Remove whitespace immediately preceding a period.
fn tighten_periods(text: &str) -> String {
    let re = SPACE_PERIOD_RE
        .get_or_init(|| Regex::new(r"\s+\.").expect("period pattern is valid"));
    re.replace_all(text, ".").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_line_breaks_real_newline() {
        assert_eq!(
            strip_line_breaks("First line.\nSee also: X"),
            "First line."
        );
    }

    #[test]
    fn test_strip_line_breaks_escaped_newline() {
        assert_eq!(strip_line_breaks("First. \\nSecond"), "First");
        assert_eq!(strip_line_breaks("First.\\nSecond"), "First");
    }

    #[test]
    fn test_strip_second_sentence() {
        assert_eq!(
            strip_second_sentence("One sentence. Another one."),
            "One sentence."
        );
    }

    #[test]
    fn test_strip_second_sentence_keeps_lowercase_continuation() {
        // A lowercase character after the period is not a sentence start.
        assert_eq!(
            strip_second_sentence("approx. one meter long."),
            "approx. one meter long."
        );
    }

    #[test]
    fn test_strip_second_sentence_splits_abbreviations() {
        // Known heuristic behavior: "D.C." style abbreviations followed by
        // a capital also truncate.
        assert_eq!(strip_second_sentence("Washington D. C. rest"), "Washington D.");
    }

    #[test]
    fn test_strip_paren_groups_simple() {
        assert_eq!(
            strip_paren_groups("a city (capital of France) in Europe"),
            "a city  in Europe"
        );
    }

    #[test]
    fn test_strip_paren_groups_nested_leaves_strays() {
        // Nested groups are peeled innermost-first; leftovers are handled
        // by the stray-paren step.
        let stripped = strip_paren_groups("x ((inner) outer) y");
        assert_eq!(strip_stray_parens(&stripped), "x  outer y");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a  b\t\tc"), "a b c");
    }

    #[test]
    fn test_unescape_quotes() {
        assert_eq!(unescape_quotes(r#"the \"best\" city"#), r#"the "best" city"#);
    }

    #[test]
    fn test_tighten_commas_and_periods() {
        assert_eq!(tighten_commas("a , b  ,c"), "a, b,c");
        assert_eq!(tighten_periods("end ."), "end.");
    }

    #[test]
    fn test_empty_input_short_circuits() {
        assert_eq!(format_extract(""), "");
    }

    #[test]
    fn test_golden_paris() {
        let raw = "Paris is a city (capital of France). It has many museums.\nSee also: X";
        assert_eq!(format_extract(raw), "Paris is a city.");
    }

    #[test]
    fn test_full_pipeline_spacing() {
        let raw = "Rust is a language (note)  focused on safety , speed .";
        assert_eq!(format_extract(raw), "Rust is a language focused on safety, speed.");
    }
}
