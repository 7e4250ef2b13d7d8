//! Markdown serialization (IR → Markdown export)
//!
//! Pipeline: IR → Comrak AST → Markdown string (comrak's CommonMark formatter)

use super::default_comrak_options;
use crate::error::FormatError;
use crate::ir::nodes::*;
use comrak::nodes::{
    Ast, AstNode, ListDelimType, ListType, NodeCode, NodeCodeBlock, NodeHeading, NodeLink,
    NodeList, NodeTable, NodeValue, TableAlignment,
};
use comrak::{format_commonmark, Arena};
use std::cell::RefCell;

/// Serialize an IR document to Markdown
///
/// The returned text has no trailing newline.
pub fn serialize_to_markdown(doc: &Document) -> Result<String, FormatError> {
    let arena = Arena::new();
    let root = new_node(&arena, NodeValue::Document);
    append_blocks(&arena, root, &doc.children);

    let mut output = Vec::new();
    let options = default_comrak_options();
    format_commonmark(root, &options, &mut output)
        .map_err(|e| FormatError::encode("md", format!("Comrak serialization failed: {e}")))?;

    let markdown = String::from_utf8(output)
        .map_err(|e| FormatError::encode("md", format!("UTF-8 conversion failed: {e}")))?;

    // Remove Comrak's "end list" HTML comments which appear between consecutive lists
    let cleaned = markdown.replace("<!-- end list -->\n\n", "");

    Ok(cleaned.trim_end().to_string())
}

fn new_node<'a>(arena: &'a Arena<AstNode<'a>>, value: NodeValue) -> &'a AstNode<'a> {
    arena.alloc(AstNode::new(RefCell::new(Ast::new(value, (0, 0).into()))))
}

fn append_blocks<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, blocks: &[DocNode]) {
    for block in blocks {
        append_block(arena, parent, block);
    }
}

fn append_block<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, block: &DocNode) {
    match block {
        DocNode::Heading(heading) => {
            let node = new_node(
                arena,
                NodeValue::Heading(NodeHeading {
                    level: heading.level.clamp(1, 6),
                    setext: false,
                }),
            );
            parent.append(node);
            append_inlines(arena, node, &heading.content);
        }

        DocNode::Paragraph(paragraph) => {
            if paragraph.content.is_empty() {
                return;
            }
            let node = new_node(arena, NodeValue::Paragraph);
            parent.append(node);
            append_inlines(arena, node, &paragraph.content);
        }

        DocNode::List(list) => {
            let node_list = NodeList {
                list_type: if list.ordered {
                    ListType::Ordered
                } else {
                    ListType::Bullet
                },
                marker_offset: 0,
                padding: 0,
                start: list.start as usize,
                delimiter: ListDelimType::Period,
                bullet_char: b'-',
                tight: is_tight(list),
            };

            let list_node = new_node(arena, NodeValue::List(node_list));
            parent.append(list_node);

            for item in &list.items {
                let item_node = new_node(arena, NodeValue::Item(node_list));
                list_node.append(item_node);
                append_blocks(arena, item_node, &item.children);
            }
        }

        DocNode::CodeBlock(code) => {
            let mut literal = code.content.clone();
            literal.push('\n');
            let node = new_node(
                arena,
                NodeValue::CodeBlock(NodeCodeBlock {
                    fenced: true,
                    fence_char: b'`',
                    fence_length: 3,
                    fence_offset: 0,
                    info: code.language.clone().unwrap_or_default(),
                    literal,
                }),
            );
            parent.append(node);
        }

        DocNode::BlockQuote(BlockQuote { children }) | DocNode::Panel(Panel { children, .. }) => {
            let node = new_node(arena, NodeValue::BlockQuote);
            parent.append(node);
            append_blocks(arena, node, children);
        }

        DocNode::Table(table) => append_table(arena, parent, table),

        DocNode::Rule => parent.append(new_node(arena, NodeValue::ThematicBreak)),
    }
}

/// A list renders tight unless an item holds more than one non-list block, in which
/// case the blocks need blank lines between them to stay separate.
fn is_tight(list: &List) -> bool {
    list.items.iter().all(|item| {
        item.children
            .iter()
            .filter(|child| !matches!(child, DocNode::List(_)))
            .count()
            <= 1
    })
}

fn append_table<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, table: &Table) {
    let num_columns = table
        .rows
        .iter()
        .map(|row| row.cells.len())
        .max()
        .unwrap_or(0);
    if num_columns == 0 {
        return;
    }

    let table_node = new_node(
        arena,
        NodeValue::Table(NodeTable {
            alignments: vec![TableAlignment::None; num_columns],
            num_columns,
            num_rows: table.rows.len(),
            num_nonempty_cells: 0,
        }),
    );
    parent.append(table_node);

    // GFM tables always start with a header row
    for (index, row) in table.rows.iter().enumerate() {
        let row_node = new_node(arena, NodeValue::TableRow(index == 0));
        table_node.append(row_node);

        for column in 0..num_columns {
            let cell_node = new_node(arena, NodeValue::TableCell);
            row_node.append(cell_node);
            if let Some(cell) = row.cells.get(column) {
                append_inlines(arena, cell_node, &cell_inlines(cell));
            }
        }
    }
}

/// Table cells hold a single line of inline content in GFM
fn cell_inlines(cell: &TableCell) -> Vec<InlineContent> {
    let mut content = Vec::new();
    for block in &cell.children {
        let inlines = match block {
            DocNode::Paragraph(paragraph) => paragraph.content.clone(),
            DocNode::Heading(heading) => heading.content.clone(),
            DocNode::CodeBlock(code) => vec![InlineContent::Code(code.content.clone())],
            _ => continue,
        };
        if !content.is_empty() {
            content.push(InlineContent::text(" "));
        }
        content.extend(inlines.into_iter().map(|inline| match inline {
            InlineContent::HardBreak => InlineContent::text(" "),
            other => other,
        }));
    }
    content
}

fn append_inlines<'a>(
    arena: &'a Arena<AstNode<'a>>,
    parent: &'a AstNode<'a>,
    content: &[InlineContent],
) {
    for inline in content {
        append_inline(arena, parent, inline);
    }
}

fn append_inline<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, inline: &InlineContent) {
    let wrap = |value: NodeValue, children: &[InlineContent]| {
        let node = new_node(arena, value);
        parent.append(node);
        append_inlines(arena, node, children);
    };

    match inline {
        InlineContent::Text(text) => {
            parent.append(new_node(arena, NodeValue::Text(text.replace('\n', " "))));
        }
        InlineContent::Bold(children) => wrap(NodeValue::Strong, children),
        InlineContent::Italic(children) => wrap(NodeValue::Emph, children),
        InlineContent::Strike(children) => wrap(NodeValue::Strikethrough, children),
        InlineContent::Superscript(children) => wrap(NodeValue::Superscript, children),
        // No markdown syntax for these; keep the content
        InlineContent::Underline(children) | InlineContent::Subscript(children) => {
            append_inlines(arena, parent, children)
        }
        InlineContent::Code(code) => {
            parent.append(new_node(
                arena,
                NodeValue::Code(NodeCode {
                    num_backticks: 1,
                    literal: code.clone(),
                }),
            ));
        }
        InlineContent::Link(link) => wrap(
            NodeValue::Link(NodeLink {
                url: link.href.clone(),
                title: String::new(),
            }),
            &link.content,
        ),
        InlineContent::Image(image) => {
            let node = new_node(
                arena,
                NodeValue::Image(NodeLink {
                    url: image.src.clone(),
                    title: String::new(),
                }),
            );
            parent.append(node);
            node.append(new_node(arena, NodeValue::Text(image.alt.clone())));
        }
        InlineContent::HardBreak => parent.append(new_node(arena, NodeValue::LineBreak)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(content: Vec<InlineContent>) -> DocNode {
        DocNode::Paragraph(Paragraph::new(content))
    }

    #[test]
    fn test_heading_and_paragraph() {
        let doc = Document::new(vec![
            DocNode::Heading(Heading {
                level: 2,
                content: vec![InlineContent::text("Title")],
            }),
            paragraph(vec![
                InlineContent::text("Some "),
                InlineContent::Bold(vec![InlineContent::text("bold")]),
                InlineContent::text(" text"),
            ]),
        ]);
        assert_eq!(
            serialize_to_markdown(&doc).unwrap(),
            "## Title\n\nSome **bold** text"
        );
    }

    #[test]
    fn test_tight_bullet_list() {
        let item = |s: &str| ListItem {
            children: vec![paragraph(vec![InlineContent::text(s)])],
        };
        let doc = Document::new(vec![DocNode::List(List {
            ordered: false,
            start: 1,
            items: vec![item("one"), item("two")],
        })]);
        assert_eq!(serialize_to_markdown(&doc).unwrap(), "- one\n- two");
    }

    #[test]
    fn test_empty_paragraphs_are_skipped() {
        let doc = Document::new(vec![paragraph(vec![])]);
        assert_eq!(serialize_to_markdown(&doc).unwrap(), "");
    }

    #[test]
    fn test_code_block_fence() {
        let doc = Document::new(vec![DocNode::CodeBlock(CodeBlock {
            language: Some("bash".to_string()),
            content: "echo \"test\"".to_string(),
        })]);
        let md = serialize_to_markdown(&doc).unwrap();
        assert!(md.starts_with("```"));
        assert!(md.lines().next().unwrap().contains("bash"));
        assert!(md.contains("\necho \"test\"\n"));
        assert!(md.ends_with("```"));
    }

    #[test]
    fn test_output_reparses_to_same_document() {
        let md = "# Title\n\nA [link](https://example.com) and `code`.\n\n1. first\n2. second\n";
        let doc = super::super::parser::parse_from_markdown(md).unwrap();
        let out = serialize_to_markdown(&doc).unwrap();
        let reparsed = super::super::parser::parse_from_markdown(&out).unwrap();
        assert_eq!(doc, reparsed);
    }
}
