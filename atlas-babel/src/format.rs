//! Format trait definition
//!
//! This module defines the core Format trait that all format implementations must implement.
//! The trait provides a uniform interface for parsing text into the IR and encoding the IR
//! back out.

use crate::error::FormatError;
use crate::ir::nodes::Document;

/// Output produced by [`Format::encode`].
#[derive(Debug, Clone, PartialEq)]
pub enum Encoded {
    /// Textual output (markdown, wiki markup)
    Text(String),
    /// Structured output (ADF); rendered to JSON text by [`Encoded::into_text`]
    Structured(serde_json::Value),
}

/// How structured output is rendered to text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonStyle {
    /// Single line, no insignificant whitespace
    #[default]
    Compact,
    /// Indented, one member per line
    Pretty,
}

impl Encoded {
    /// Consume the output and return it as text, rendering structured values as JSON.
    pub fn into_text(self, style: JsonStyle) -> Result<String, FormatError> {
        match self {
            Encoded::Text(text) => Ok(text),
            Encoded::Structured(value) => {
                let rendered = match style {
                    JsonStyle::Compact => serde_json::to_string(&value),
                    JsonStyle::Pretty => serde_json::to_string_pretty(&value),
                };
                rendered.map_err(|e| FormatError::encode("json", e.to_string()))
            }
        }
    }
}

/// Trait for document formats
///
/// Implementors provide bidirectional conversion between a textual representation and the
/// IR [`Document`].
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &'static str {
///         "my-format"
///     }
///
///     fn parse(&self, source: &str) -> Result<Document, FormatError> {
///         todo!()
///     }
///
///     fn encode(&self, doc: &Document) -> Result<Encoded, FormatError> {
///         todo!()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The identifier of this format as used on the command line (e.g., "md", "adf")
    fn name(&self) -> &'static str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// Parse source text into a Document
    fn parse(&self, source: &str) -> Result<Document, FormatError>;

    /// Encode a Document into this format
    fn encode(&self, doc: &Document) -> Result<Encoded, FormatError>;
}
