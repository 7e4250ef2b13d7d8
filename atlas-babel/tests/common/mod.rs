//! Shared fixtures for the integration tests.

use atlas_babel::ir::nodes::{
    BlockQuote, CodeBlock, DocNode, Document, Heading, Image, InlineContent, Link, List,
    ListItem, Paragraph, Table, TableCell, TableRow,
};
use std::fs;
use std::path::PathBuf;

pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

pub fn text(s: &str) -> InlineContent {
    InlineContent::text(s)
}

pub fn para(content: Vec<InlineContent>) -> DocNode {
    DocNode::Paragraph(Paragraph::new(content))
}

pub fn heading(level: u8, s: &str) -> DocNode {
    DocNode::Heading(Heading {
        level,
        content: vec![text(s)],
    })
}

fn item(children: Vec<DocNode>) -> ListItem {
    ListItem { children }
}

fn cell(header: bool, s: &str) -> TableCell {
    TableCell {
        header,
        children: vec![para(vec![text(s)])],
    }
}

/// The document every `kitchensink.*` fixture describes.
pub fn kitchensink() -> Document {
    Document::new(vec![
        heading(1, "Kitchen sink"),
        para(vec![
            text("Plain text with "),
            InlineContent::Bold(vec![text("bold")]),
            text(", "),
            InlineContent::Italic(vec![text("italic")]),
            text(", "),
            InlineContent::Strike(vec![text("struck")]),
            text(", "),
            InlineContent::Code("code".to_string()),
            text(" and a "),
            InlineContent::Link(Link {
                href: "https://example.com".to_string(),
                content: vec![text("link")],
            }),
            text("."),
        ]),
        para(vec![
            text("Line one"),
            InlineContent::HardBreak,
            text("line two"),
        ]),
        heading(2, "Lists"),
        DocNode::List(List {
            ordered: false,
            start: 1,
            items: vec![
                item(vec![para(vec![text("first")])]),
                item(vec![
                    para(vec![text("second")]),
                    DocNode::List(List {
                        ordered: true,
                        start: 1,
                        items: vec![
                            item(vec![para(vec![text("inner one")])]),
                            item(vec![para(vec![text("inner two")])]),
                        ],
                    }),
                ]),
                item(vec![para(vec![text("third")])]),
            ],
        }),
        heading(2, "Code"),
        DocNode::CodeBlock(CodeBlock {
            language: Some("rust".to_string()),
            content: "fn main() {\n    println!(\"hi\");\n}".to_string(),
        }),
        DocNode::BlockQuote(BlockQuote {
            children: vec![para(vec![text("Quoted text")])],
        }),
        DocNode::Table(Table {
            rows: vec![
                TableRow {
                    cells: vec![cell(true, "A"), cell(true, "B")],
                },
                TableRow {
                    cells: vec![cell(false, "1"), cell(false, "2")],
                },
            ],
        }),
        para(vec![InlineContent::Image(Image {
            src: "https://example.com/logo.png".to_string(),
            alt: "Logo".to_string(),
        })]),
        DocNode::Rule,
        para(vec![text("The end.")]),
    ])
}
