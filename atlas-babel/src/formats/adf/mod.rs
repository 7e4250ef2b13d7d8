//! Atlassian Document Format (ADF) implementation
//!
//! ADF is the JSON document model used by Jira Cloud and Confluence Cloud. Documents are a
//! tree of typed nodes rooted at `{"type": "doc", "version": 1}`; inline styling is carried
//! as a list of marks on each text node.
//!
//! # Element Mapping Table
//!
//! | IR Element   | ADF Equivalent                 | Notes                                       |
//! |--------------|--------------------------------|---------------------------------------------|
//! | Heading      | `heading` (attrs.level)        | Direct                                      |
//! | Paragraph    | `paragraph`                    | Image-only paragraphs become `mediaSingle`  |
//! | List         | `bulletList` / `orderedList`   | `attrs.order` carries the start number      |
//! | CodeBlock    | `codeBlock` (attrs.language)   | Direct                                      |
//! | BlockQuote   | `blockquote`                   | Direct                                      |
//! | Panel        | `panel` (attrs.panelType)      | Unknown panel types read as info            |
//! | Table        | `table` / `tableRow`           | Header cells are `tableHeader`              |
//! | Rule         | `rule`                         | Direct                                      |
//! | Inline style | marks                          | strong, em, strike, underline, subsup, code |
//! | Link         | `link` mark                    | Direct                                      |
//! | HardBreak    | `hardBreak`                    | Direct                                      |
//!
//! Node and mark types outside this table (mentions, emoji, extensions, ...) are skipped
//! on import with a warning.

pub mod parser;
pub mod schema;
pub mod serializer;

use crate::error::FormatError;
use crate::format::{Encoded, Format};
use crate::ir::nodes::Document;

/// Format implementation for ADF JSON
pub struct AdfFormat;

impl Format for AdfFormat {
    fn name(&self) -> &'static str {
        "adf"
    }

    fn description(&self) -> &str {
        "Atlassian Document Format (JSON)"
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        parser::parse_from_adf(source)
    }

    fn encode(&self, doc: &Document) -> Result<Encoded, FormatError> {
        serializer::encode_adf(doc).map(Encoded::Structured)
    }
}
