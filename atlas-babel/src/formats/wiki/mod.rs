//! Jira / Confluence wiki markup implementation
//!
//! There is no maintained Rust crate for this markup, so both directions are written
//! here: a line-oriented block parser ([`parser`]) on top of a character-scanning inline
//! parser ([`inline`]), and a string builder for export ([`serializer`]).
//!
//! # Element Mapping Table
//!
//! | IR Element   | Wiki Syntax                          | Notes                                   |
//! |--------------|--------------------------------------|-----------------------------------------|
//! | Heading      | `h1.` .. `h6.`                       | Direct                                  |
//! | Paragraph    | Lines of text                        | Line breaks inside are hard breaks      |
//! | List         | `*` / `-` / `#`, nested as `#*`      | Start number is not representable       |
//! | CodeBlock    | `{code:lang}` / `{noformat}`         | `language=` parameter also read         |
//! | BlockQuote   | `{quote}` / `bq.`                    | Direct                                  |
//! | Panel        | `{info}` `{note}` `{warning}` `{tip}` | `{panel}` reads as info; error -> warning |
//! | Table        | `||header||` / `|cell|`              | Cells hold one line of inline content   |
//! | Rule         | `----`                               | Direct                                  |
//! | Bold/Italic  | `*b*` / `_i_`                        | Only at word boundaries                 |
//! | Strike/Under | `-s-` / `+u+`                        | Only at word boundaries                 |
//! | Sup/Sub      | `^sup^` / `~sub~`                    | Only at word boundaries                 |
//! | Code         | `{{mono}}`                           | Content is raw                          |
//! | Link         | `[text|url]` / `[url]`               | Direct                                  |
//! | Image        | `!src!` / `!src|alt=text!`           | Other image parameters are ignored      |
//! | HardBreak    | line break / `\\`                    | `\\` inside single-line constructs      |

pub mod inline;
pub mod parser;
pub mod serializer;

use crate::error::FormatError;
use crate::format::{Encoded, Format};
use crate::ir::nodes::Document;

/// Format implementation for wiki markup
pub struct WikiFormat;

impl Format for WikiFormat {
    fn name(&self) -> &'static str {
        "wiki"
    }

    fn description(&self) -> &str {
        "Jira / Confluence wiki markup"
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        parser::parse_from_wiki(source)
    }

    fn encode(&self, doc: &Document) -> Result<Encoded, FormatError> {
        Ok(Encoded::Text(serializer::serialize_to_wiki(doc)))
    }
}
