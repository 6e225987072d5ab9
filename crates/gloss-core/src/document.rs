//! Document collaborator boundary
//!
//! The mutator addresses paragraphs only by their position in an ordered,
//! mutable sequence, through a narrow trait that a host document editor
//! would implement. The shipped implementation is `TextDocument`: a plain
//! text or markdown file with one paragraph per line, where bold and
//! italic are rendered as `**...**` and `*...*`.

use std::fs;
use std::path::Path;

use crate::error::{GlossError, Result};

/// Ordered paragraph access. Indices are positional; callers must stay
/// within `0..len()`.
pub trait Document {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn text(&self, index: usize) -> &str;

    fn set_text(&mut self, index: usize, text: &str);

    fn set_bold(&mut self, index: usize, bold: bool);

    fn set_italic(&mut self, index: usize, italic: bool);
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Paragraph {
    text: String,
    bold: bool,
    italic: bool,
}

impl Paragraph {
    /// Parse markdown-style markup back into formatting flags so that
    /// re-running gloss on its own output does not double-wrap.
    fn parse(line: &str) -> Self {
        let mut text = line;
        let mut bold = false;
        let mut italic = false;

        if text.len() > 4 && text.starts_with("**") && text.ends_with("**") {
            bold = true;
            text = &text[2..text.len() - 2];
        }
        if text.len() > 2 && text.starts_with('*') && text.ends_with('*') {
            italic = true;
            text = &text[1..text.len() - 1];
        }

        Self {
            text: text.to_string(),
            bold,
            italic,
        }
    }

    fn render(&self) -> String {
        let mut out = self.text.clone();
        if self.italic && !out.is_empty() {
            out = format!("*{}*", out);
        }
        if self.bold && !out.is_empty() {
            out = format!("**{}**", out);
        }
        out
    }
}

/// A line-per-paragraph text file.
#[derive(Debug)]
pub struct TextDocument {
    paragraphs: Vec<Paragraph>,
    trailing_newline: bool,
}

impl TextDocument {
    /// Load a document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GlossError::DocumentNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                GlossError::Io(e)
            }
        })?;
        let content = String::from_utf8(content).map_err(|_| GlossError::InvalidDocument {
            path: path.to_path_buf(),
            reason: "not valid UTF-8".to_string(),
        })?;

        Ok(Self::from_content(&content))
    }

    /// Build a document from raw text content.
    pub fn from_content(content: &str) -> Self {
        let trailing_newline = content.ends_with('\n');
        let body = content.strip_suffix('\n').unwrap_or(content);
        let paragraphs = if body.is_empty() {
            Vec::new()
        } else {
            body.split('\n').map(Paragraph::parse).collect()
        };

        Self {
            paragraphs,
            trailing_newline,
        }
    }

    /// Render the document back to text, re-applying markup.
    pub fn render(&self) -> String {
        let mut out = self
            .paragraphs
            .iter()
            .map(Paragraph::render)
            .collect::<Vec<_>>()
            .join("\n");
        if self.trailing_newline {
            out.push('\n');
        }
        out
    }

    /// Write the document back to disk.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render())?;
        Ok(())
    }
}

impl Document for TextDocument {
    fn len(&self) -> usize {
        self.paragraphs.len()
    }

    fn text(&self, index: usize) -> &str {
        &self.paragraphs[index].text
    }

    fn set_text(&mut self, index: usize, text: &str) {
        self.paragraphs[index].text = text.to_string();
    }

    fn set_bold(&mut self, index: usize, bold: bool) {
        self.paragraphs[index].bold = bold;
    }

    fn set_italic(&mut self, index: usize, italic: bool) {
        self.paragraphs[index].italic = italic;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_from_content_splits_lines() {
        let doc = TextDocument::from_content("Apple:\nNot a term\nBanana :  \n");
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.text(0), "Apple:");
        assert_eq!(doc.text(2), "Banana :  ");
    }

    #[test]
    fn test_empty_content() {
        assert!(TextDocument::from_content("").is_empty());
        assert!(TextDocument::from_content("\n").is_empty());
    }

    #[test]
    fn test_render_preserves_trailing_newline() {
        assert_eq!(TextDocument::from_content("a\nb\n").render(), "a\nb\n");
        assert_eq!(TextDocument::from_content("a\nb").render(), "a\nb");
    }

    #[test]
    fn test_markup_round_trip() {
        let mut doc = TextDocument::from_content("first\nsecond\n");
        doc.set_bold(0, true);
        doc.set_italic(1, true);
        assert_eq!(doc.render(), "**first**\n*second*\n");

        // Reloading parses the markup back into flags instead of treating
        // the stars as paragraph text.
        let reloaded = TextDocument::from_content(&doc.render());
        assert_eq!(reloaded.text(0), "first");
        assert_eq!(reloaded.text(1), "second");
        assert_eq!(reloaded.render(), doc.render());
    }

    #[test]
    fn test_bold_italic_combined() {
        let mut doc = TextDocument::from_content("word\n");
        doc.set_bold(0, true);
        doc.set_italic(0, true);
        assert_eq!(doc.render(), "***word***\n");

        let reloaded = TextDocument::from_content("***word***\n");
        assert_eq!(reloaded.text(0), "word");
        assert_eq!(reloaded.render(), "***word***\n");
    }

    #[test]
    fn test_load_missing_file() {
        let err = TextDocument::load(Path::new("/nonexistent/doc.txt")).unwrap_err();
        assert!(matches!(err, GlossError::DocumentNotFound { .. }));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path: PathBuf = dir.path().join("doc.txt");
        fs::write(&path, "Apple:\nplain\n").unwrap();

        let mut doc = TextDocument::load(&path).unwrap();
        doc.set_text(0, "Apple: a fruit.");
        doc.save(&path).unwrap();

        let reloaded = TextDocument::load(&path).unwrap();
        assert_eq!(reloaded.text(0), "Apple: a fruit.");
    }
}
