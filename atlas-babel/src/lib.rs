//! Format interoperability for Atlassian documents
//!
//!     This crate converts documents between Markdown, the Atlassian Document Format (ADF, the
//!     JSON tree used by Jira and Confluence Cloud) and Jira/Confluence wiki markup.
//!
//!     TLDR: For format authors:
//!         - Every format parses into the IR (./ir/nodes.rs) and encodes from it. Formats never
//!           talk to each other directly.
//!         - Parsers hand back documents in canonical form (see ./common/inlines.rs), so two
//!           documents with the same visible structure compare equal.
//!         - Where a good crate exists for a format we adapt its AST instead of writing a parser
//!           (comrak for Markdown, serde for ADF). Wiki markup has no such crate and is
//!           hand-written.
//!         - Each format has unit tests next to its parser and serializer, and integration tests
//!           under tests/<format>.
//!
//! Architecture
//!
//!     This is a pure lib: it powers atlas-cli but is shell agnostic, so no code here reads
//!     stdin, prints, or looks at env vars.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatId: the closed set of formats
//!     ├── formats
//!     │   ├── <format>
//!     │   │   ├── parser.rs       # Parser implementation
//!     │   │   ├── serializer.rs   # Serializer implementation
//!     │   │   └── mod.rs
//!     ├── lib.rs
//!     ├── ir                      # Intermediate Representation
//!     ├── common                  # Format agnostic helpers
//!
//! Testing
//!     tests
//!     └── <format>
//!         ├── <testname>.rs
//!     └── fixtures
//!         ├── kitchensink.md
//!         ├── kitchensink.wiki
//!         └── kitchensink.json
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Fidelity
//!
//!     The IR is the intersection of what the three formats can say, plus panels and
//!     underline/subscript which two of them share. Converting into a format that lacks a
//!     construct keeps the content and drops the styling (an ADF panel becomes a Markdown
//!     quote, underline becomes plain text). Each format module documents its mapping table.

pub mod common;
pub mod error;
pub mod format;
pub mod formats;
pub mod ir;
pub mod registry;

pub use error::FormatError;
pub use format::{Encoded, Format, JsonStyle};
pub use registry::FormatId;

/// Options applied after the target format has encoded the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Rendering of structured (ADF) output
    pub json_style: JsonStyle,
    /// Cut the output to at most this many characters
    pub max_output_chars: Option<usize>,
}

/// Convert `source` from one format to another.
///
/// Runs the source engine's parser, hands the resulting IR document to the target
/// engine's encoder and renders the result as text. Nothing is written anywhere; the
/// caller decides what to do with the returned string.
pub fn convert(
    source: &str,
    from: FormatId,
    to: FormatId,
    options: &ConvertOptions,
) -> Result<String, FormatError> {
    tracing::debug!(%from, %to, bytes = source.len(), "converting");

    let doc = from.parse(source)?;
    tracing::debug!(blocks = doc.children.len(), "parsed source document");

    let encoded = to.encode(&doc)?;
    let text = encoded.into_text(options.json_style)?;

    match options.max_output_chars {
        Some(max) => {
            let truncated = common::text::truncate_chars(&text, max);
            if truncated.len() < text.len() {
                tracing::debug!(max, "truncated output");
            }
            Ok(truncated.to_string())
        }
        None => Ok(text),
    }
}
