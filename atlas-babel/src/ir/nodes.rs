//! Core data structures for the Intermediate Representation (IR).

/// Represents the root of a document.
///
/// This is the value handed from a source format's parser to a target format's
/// encoder. Parsers always return it in canonical form (see
/// [`crate::common::inlines::normalize_document`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub children: Vec<DocNode>,
}

impl Document {
    pub fn new(children: Vec<DocNode>) -> Self {
        Document { children }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// A block-level node.
#[derive(Debug, Clone, PartialEq)]
pub enum DocNode {
    Heading(Heading),
    Paragraph(Paragraph),
    List(List),
    CodeBlock(CodeBlock),
    BlockQuote(BlockQuote),
    Panel(Panel),
    Table(Table),
    Rule,
}

/// Represents a heading with a specific level (1 to 6).
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub level: u8,
    pub content: Vec<InlineContent>,
}

/// Represents a paragraph of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub content: Vec<InlineContent>,
}

impl Paragraph {
    pub fn new(content: Vec<InlineContent>) -> Self {
        Paragraph { content }
    }
}

/// Represents a list of items.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    pub ordered: bool,
    /// First number of an ordered list. Always 1 for bullet lists.
    pub start: u32,
    pub items: Vec<ListItem>,
}

/// Represents an item in a list. Nested lists live in `children`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub children: Vec<DocNode>,
}

/// Represents a block of preformatted text.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    pub language: Option<String>,
    /// Code text without a trailing newline.
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockQuote {
    pub children: Vec<DocNode>,
}

/// A highlighted callout box.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub kind: PanelKind,
    pub children: Vec<DocNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Info,
    Note,
    Warning,
    Success,
    Error,
}

/// Represents a table. Header cells are flagged per cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub header: bool,
    pub children: Vec<DocNode>,
}

/// Represents inline content, such as text, bold, italics, etc.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineContent {
    Text(String),
    Bold(Vec<InlineContent>),
    Italic(Vec<InlineContent>),
    Strike(Vec<InlineContent>),
    Underline(Vec<InlineContent>),
    Superscript(Vec<InlineContent>),
    Subscript(Vec<InlineContent>),
    Code(String),
    Link(Link),
    Image(Image),
    HardBreak,
}

impl InlineContent {
    pub fn text(text: impl Into<String>) -> Self {
        InlineContent::Text(text.into())
    }

    /// Children of a wrapping inline (bold, italic, ...), if this is one.
    pub fn wrapped_children(&self) -> Option<&[InlineContent]> {
        match self {
            InlineContent::Bold(children)
            | InlineContent::Italic(children)
            | InlineContent::Strike(children)
            | InlineContent::Underline(children)
            | InlineContent::Superscript(children)
            | InlineContent::Subscript(children) => Some(children),
            InlineContent::Link(link) => Some(&link.content),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub href: String,
    pub content: Vec<InlineContent>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub src: String,
    pub alt: String,
}

/// Flattens inline content to its visible text.
pub fn plain_text(content: &[InlineContent]) -> String {
    let mut out = String::new();
    collect_plain_text(content, &mut out);
    out
}

fn collect_plain_text(content: &[InlineContent], out: &mut String) {
    for inline in content {
        match inline {
            InlineContent::Text(text) | InlineContent::Code(text) => out.push_str(text),
            InlineContent::Image(image) => out.push_str(&image.alt),
            InlineContent::HardBreak => out.push('\n'),
            other => {
                if let Some(children) = other.wrapped_children() {
                    collect_plain_text(children, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_walks_nested_inlines() {
        let content = vec![
            InlineContent::text("a "),
            InlineContent::Bold(vec![InlineContent::Italic(vec![InlineContent::text(
                "b",
            )])]),
            InlineContent::HardBreak,
            InlineContent::Link(Link {
                href: "https://example.com".to_string(),
                content: vec![InlineContent::Code("c".to_string())],
            }),
        ];
        assert_eq!(plain_text(&content), "a b\nc");
    }
}
