//! Error types and exit codes for gloss
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (IO, network, serialization)
//! - 2: Usage error (bad flags/args)
//! - 3: Document error (missing file, unreadable paragraphs)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the gloss CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Document error - missing or unreadable document (3)
    Document = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during gloss operations
#[derive(Error, Debug)]
pub enum GlossError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("--format may only be specified once")]
    DuplicateFormat,

    #[error("{0}")]
    UsageError(String),

    // Document errors (exit code 3)
    #[error("document not found: {path:?}")]
    DocumentNotFound { path: PathBuf },

    #[error("invalid document {path:?}: {reason}")]
    InvalidDocument { path: PathBuf, reason: String },

    // Generic failures (exit code 1)
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl GlossError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            // Usage errors
            GlossError::UnknownFormat(_)
            | GlossError::DuplicateFormat
            | GlossError::UsageError(_) => ExitCode::Usage,

            // Document errors
            GlossError::DocumentNotFound { .. }
            | GlossError::InvalidDocument { .. } => ExitCode::Document,

            // Generic failures
            GlossError::Http(_)
            | GlossError::InvalidConfig(_)
            | GlossError::Io(_)
            | GlossError::Json(_)
            | GlossError::Toml(_)
            | GlossError::Other(_) => ExitCode::Failure,
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            GlossError::UnknownFormat(_) => "unknown_format",
            GlossError::DuplicateFormat => "duplicate_format",
            GlossError::UsageError(_) => "usage_error",
            GlossError::DocumentNotFound { .. } => "document_not_found",
            GlossError::InvalidDocument { .. } => "invalid_document",
            GlossError::Http(_) => "http_error",
            GlossError::InvalidConfig(_) => "invalid_config",
            GlossError::Io(_) => "io_error",
            GlossError::Json(_) => "json_error",
            GlossError::Toml(_) => "toml_error",
            GlossError::Other(_) => "other",
        }
    }
}

/// Result type alias for gloss operations
pub type Result<T> = std::result::Result<T, GlossError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_errors_exit_code_2() {
        assert_eq!(
            GlossError::UnknownFormat("xml".into()).exit_code(),
            ExitCode::Usage
        );
        assert_eq!(GlossError::DuplicateFormat.exit_code(), ExitCode::Usage);
    }

    #[test]
    fn test_document_errors_exit_code_3() {
        let err = GlossError::DocumentNotFound {
            path: PathBuf::from("missing.txt"),
        };
        assert_eq!(err.exit_code(), ExitCode::Document);
    }

    #[test]
    fn test_http_error_exit_code_1() {
        assert_eq!(
            GlossError::Http("timed out".into()).exit_code(),
            ExitCode::Failure
        );
    }

    #[test]
    fn test_to_json_envelope() {
        let err = GlossError::UsageError("bad flag".into());
        let json = err.to_json();
        assert_eq!(json["error"]["code"], 2);
        assert_eq!(json["error"]["type"], "usage_error");
        assert_eq!(json["error"]["message"], "bad flag");
    }
}
