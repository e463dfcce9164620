//! Error types for the quayside crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning a clause into a [`Query`](crate::Query).
///
/// Evaluation never fails: missing fields and type mismatches simply do not
/// match. Only the text of the clause can be wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A condition does not follow the `field OP value` grammar.
    ///
    /// Carries the offending condition text verbatim.
    #[error("invalid condition format: {0}")]
    MalformedCondition(String),
}

/// Errors that can occur when loading records into a [`Database`](crate::Database).
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level JSON value is not an array.
    #[error("expected a JSON array of records")]
    NotAnArray,

    /// An element of the array is not a JSON object.
    #[error("record {index} is not a JSON object")]
    NotAnObject { index: usize },
}

/// Result type for clause parsing.
pub type Result<T> = std::result::Result<T, ParseError>;
