//! Markdown format implementation
//!
//! This module implements bidirectional conversion between the IR and CommonMark Markdown
//! (with the GFM table, strikethrough, autolink and tasklist extensions).
//!
//! # Library Choice
//!
//! We use the `comrak` crate for Markdown parsing and serialization. One crate covers both
//! directions, is CommonMark compliant and supports the GFM extensions we need. We never
//! write markdown text by hand: the IR is mapped onto a comrak AST which comrak then formats.
//!
//! # Element Mapping Table
//!
//! | IR Element   | Markdown Equivalent     | Export Notes                         | Import Notes                    |
//! |--------------|-------------------------|--------------------------------------|---------------------------------|
//! | Heading      | `#` .. `######`         | Level clamped to 1-6                 | ATX and setext                  |
//! | Paragraph    | Paragraph               | Empty paragraphs are skipped         | Soft breaks become spaces       |
//! | List         | `-` / `1.`              | Start number kept, tight when simple | Task items read as plain items  |
//! | CodeBlock    | Fenced code block       | Language -> info string              | Indented blocks too             |
//! | BlockQuote   | `>`                     | Direct                               | Direct                          |
//! | Panel        | `>`                     | Lossy: the panel kind is dropped     | n/a                             |
//! | Table        | GFM table               | First row is the header row          | Cells hold one paragraph        |
//! | Rule         | `---`                   | Direct                               | Direct                          |
//! | Bold/Italic  | `**` / `*`              | Direct                               | Both `*` and `_` forms          |
//! | Strike       | `~~`                    | Direct                               | Direct                          |
//! | Superscript  | `^`                     | Direct                               | Direct                          |
//! | Underline    | none                    | Lossy: content kept, style dropped   | n/a                             |
//! | Subscript    | none                    | Lossy: content kept, style dropped   | n/a                             |
//! | Code         | `` `code` ``            | Direct                               | Direct                          |
//! | Link / Image | `[t](u)` / `![a](u)`    | Direct                               | Autolinks included              |
//! | HardBreak    | backslash line break    | Direct                               | Direct                          |
//!
//! Raw HTML is not interpreted; it is carried over as literal text. Front matter is dropped.

pub mod parser;
pub mod serializer;

use crate::error::FormatError;
use crate::format::{Encoded, Format};
use crate::ir::nodes::Document;
use comrak::ComrakOptions;

/// Format implementation for Markdown
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &'static str {
        "md"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown with GFM tables and strikethrough"
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        parser::parse_from_markdown(source)
    }

    fn encode(&self, doc: &Document) -> Result<Encoded, FormatError> {
        serializer::serialize_to_markdown(doc).map(Encoded::Text)
    }
}

pub(crate) fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.superscript = true;
    options.extension.front_matter_delimiter = Some("---".to_string());
    options
}
