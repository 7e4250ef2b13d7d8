//! Error types for format operations

use thiserror::Error;

/// Errors that can occur while resolving, parsing or encoding a format
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Format identifier does not name a known format
    #[error("Unknown format '{0}' (expected one of: md, adf, wiki)")]
    UnknownFormat(String),
    /// The source engine rejected the input text
    #[error("Parse error ({format}): {message}")]
    Parse {
        format: &'static str,
        message: String,
    },
    /// The target engine could not represent the document
    #[error("Encode error ({format}): {message}")]
    Encode {
        format: &'static str,
        message: String,
    },
}

impl FormatError {
    pub fn parse(format: &'static str, message: impl Into<String>) -> Self {
        FormatError::Parse {
            format,
            message: message.into(),
        }
    }

    pub fn encode(format: &'static str, message: impl Into<String>) -> Self {
        FormatError::Encode {
            format,
            message: message.into(),
        }
    }
}
