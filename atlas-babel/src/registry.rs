//! Format registry for format discovery and selection
//!
//! The set of formats is closed, so the registry is an enum rather than a name-keyed
//! map: [`FormatId`] is resolved from a command-line token once, and every later
//! lookup is an exhaustive `match` to a `&'static` engine. Nothing is constructed or
//! mutated at runtime.

use crate::error::FormatError;
use crate::format::{Encoded, Format};
use crate::formats::{AdfFormat, MarkdownFormat, WikiFormat};
use crate::ir::nodes::Document;
use std::fmt;
use std::str::FromStr;

/// Identifier of a supported format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatId {
    /// CommonMark/GFM markdown (`md`)
    Markdown,
    /// Atlassian Document Format JSON (`adf`)
    Adf,
    /// Jira/Confluence wiki markup (`wiki`)
    Wiki,
}

impl FormatId {
    /// Every supported format, in display order.
    pub const ALL: [FormatId; 3] = [FormatId::Markdown, FormatId::Adf, FormatId::Wiki];

    /// The command-line token for this format.
    pub fn name(self) -> &'static str {
        match self {
            FormatId::Markdown => "md",
            FormatId::Adf => "adf",
            FormatId::Wiki => "wiki",
        }
    }

    /// The engine implementing this format.
    pub fn format(self) -> &'static dyn Format {
        match self {
            FormatId::Markdown => &MarkdownFormat,
            FormatId::Adf => &AdfFormat,
            FormatId::Wiki => &WikiFormat,
        }
    }

    /// Parse source text with this format's engine
    pub fn parse(self, source: &str) -> Result<Document, FormatError> {
        self.format().parse(source)
    }

    /// Encode a document with this format's engine
    pub fn encode(self, doc: &Document) -> Result<Encoded, FormatError> {
        self.format().encode(doc)
    }
}

impl FromStr for FormatId {
    type Err = FormatError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        FormatId::ALL
            .into_iter()
            .find(|id| id.name() == name)
            .ok_or_else(|| FormatError::UnknownFormat(name.to_string()))
    }
}

impl fmt::Display for FormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
