//! Error types for the manifest registry

use thiserror::Error;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, ManifestError>;

/// Manifest registry errors
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(
        "Attribute '{name}' not found in MANIFEST.MF file(s) among {count} other attribute(s): {}",
        format_keys(.known)
    )]
    NotFound {
        name: String,
        count: usize,
        known: Vec<String>,
    },

    #[error("Source error: {0}")]
    Source(#[from] std::io::Error),
}

impl ManifestError {
    /// True for the "no such attribute" failure of `read`
    pub fn is_not_found(&self) -> bool {
        matches!(self, ManifestError::NotFound { .. })
    }

    /// True for a rejected (empty) attribute name
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ManifestError::InvalidArgument(_))
    }
}

fn format_keys(keys: &[String]) -> String {
    format!("[{}]", keys.join(", "))
}

/// A malformed manifest document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number where parsing stopped
    pub line: usize,
    pub kind: ParseErrorKind,
}

/// Why a manifest document was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("invalid header field")]
    InvalidHeader,

    #[error("invalid attribute name: {0:?}")]
    InvalidName(String),

    #[error("misplaced continuation line")]
    MisplacedContinuation,

    #[error("line too long (max {max} bytes)")]
    LineTooLong { max: usize },

    #[error("document too large (max {max} bytes)")]
    DocumentTooLarge { max: usize },

    #[error("invalid UTF-8")]
    InvalidUtf8,

    #[error("read failed: {0}")]
    Io(String),
}
