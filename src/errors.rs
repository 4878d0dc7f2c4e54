//! Error types
//!
//! The scoring core is total over any tagged corpus; errors only arise while
//! reading tagger output or loading configuration.

use thiserror::Error;

/// Result type with [`ExtractionError`] as the default error.
pub type Result<T, E = ExtractionError> = std::result::Result<T, E>;

/// Errors raised at the edges of the extraction pipeline.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A line of tagger output could not be parsed.
    #[error("malformed tagger output at line {line}: {content:?}")]
    MalformedLine { line: usize, content: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
