//! Error types for conversion operations

use std::fmt;

/// Errors that can occur while converting between representations
///
/// All variants are fatal at this layer: there is no retry or partial-success
/// mode, and partially written output is left in place for inspection.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// Malformed path or line token in the flat format
    Parse(String),
    /// Malformed directory tree: missing or bad info file, identity mismatch,
    /// or an indented flat-format line with no preceding path line
    Structural(String),
    /// Old tree and new listing disagree about an identity or its level
    Consistency(String),
    /// Underlying filesystem failure
    Io(String),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Parse(msg) => write!(f, "Parse error: {msg}"),
            ConvertError::Structural(msg) => write!(f, "Structural error: {msg}"),
            ConvertError::Consistency(msg) => write!(f, "Consistency error: {msg}"),
            ConvertError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for ConvertError {}

impl From<std::io::Error> for ConvertError {
    fn from(err: std::io::Error) -> Self {
        ConvertError::Io(err.to_string())
    }
}
