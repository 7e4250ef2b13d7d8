//! Markdown parsing (Markdown → IR import)
//!
//! Pipeline: Markdown string → Comrak AST → IR

use super::default_comrak_options;
use crate::common::inlines::normalize_document;
use crate::error::FormatError;
use crate::ir::nodes::*;
use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena};

/// Parse Markdown string to an IR document
///
/// CommonMark accepts every input, so this never fails; the `Result` keeps the
/// signature uniform with the other formats.
pub fn parse_from_markdown(source: &str) -> Result<Document, FormatError> {
    let arena = Arena::new();
    let options = default_comrak_options();
    let root = parse_document(&arena, source, &options);

    let children = collect_blocks(root.children());
    Ok(normalize_document(Document::new(children)))
}

fn collect_blocks<'a, I>(nodes: I) -> Vec<DocNode>
where
    I: Iterator<Item = &'a AstNode<'a>>,
{
    let mut blocks = Vec::new();
    for node in nodes {
        if let Some(block) = convert_block(node) {
            blocks.push(block);
        }
    }
    blocks
}

fn convert_block<'a>(node: &'a AstNode<'a>) -> Option<DocNode> {
    let node_data = node.data.borrow();

    match &node_data.value {
        NodeValue::Heading(heading) => Some(DocNode::Heading(Heading {
            level: heading.level,
            content: collect_inlines(node),
        })),

        NodeValue::Paragraph => Some(DocNode::Paragraph(Paragraph::new(collect_inlines(node)))),

        NodeValue::List(list) => {
            let ordered = matches!(list.list_type, ListType::Ordered);
            let start = if ordered {
                u32::try_from(list.start).unwrap_or(1)
            } else {
                1
            };
            let items = node
                .children()
                .map(|item| ListItem {
                    children: collect_blocks(item.children()),
                })
                .collect();
            Some(DocNode::List(List {
                ordered,
                start,
                items,
            }))
        }

        NodeValue::CodeBlock(code_block) => {
            // Only the first word of the info string names the language
            let language = code_block
                .info
                .split_whitespace()
                .next()
                .map(str::to_string);
            let content = code_block
                .literal
                .strip_suffix('\n')
                .unwrap_or(&code_block.literal)
                .to_string();
            Some(DocNode::CodeBlock(CodeBlock { language, content }))
        }

        NodeValue::BlockQuote => Some(DocNode::BlockQuote(BlockQuote {
            children: collect_blocks(node.children()),
        })),

        NodeValue::ThematicBreak => Some(DocNode::Rule),

        NodeValue::Table(_) => {
            let rows = node
                .children()
                .map(|row| {
                    let header = matches!(row.data.borrow().value, NodeValue::TableRow(true));
                    let cells = row
                        .children()
                        .map(|cell| {
                            let content = collect_inlines(cell);
                            let children = if content.is_empty() {
                                vec![]
                            } else {
                                vec![DocNode::Paragraph(Paragraph::new(content))]
                            };
                            TableCell { header, children }
                        })
                        .collect();
                    TableRow { cells }
                })
                .collect();
            Some(DocNode::Table(Table { rows }))
        }

        NodeValue::HtmlBlock(html) => {
            // Raw HTML is carried over verbatim as text
            let literal = html.literal.trim_end();
            if literal.is_empty() {
                None
            } else {
                Some(DocNode::Paragraph(Paragraph::new(vec![InlineContent::text(
                    literal,
                )])))
            }
        }

        NodeValue::FrontMatter(_) => {
            tracing::debug!("dropping markdown front matter");
            None
        }

        other => {
            tracing::debug!(node = ?other, "skipping unsupported markdown block");
            None
        }
    }
}

/// Collect the inline children of a comrak node
fn collect_inlines<'a>(node: &'a AstNode<'a>) -> Vec<InlineContent> {
    let mut content = Vec::new();
    for child in node.children() {
        collect_inline(child, &mut content);
    }
    content
}

fn collect_inline<'a>(node: &'a AstNode<'a>, content: &mut Vec<InlineContent>) {
    let node_data = node.data.borrow();

    match &node_data.value {
        NodeValue::Text(text) => content.push(InlineContent::Text(text.clone())),

        NodeValue::Strong => content.push(InlineContent::Bold(collect_inlines(node))),

        NodeValue::Emph => content.push(InlineContent::Italic(collect_inlines(node))),

        NodeValue::Strikethrough => content.push(InlineContent::Strike(collect_inlines(node))),

        NodeValue::Superscript => {
            content.push(InlineContent::Superscript(collect_inlines(node)))
        }

        NodeValue::Code(code) => content.push(InlineContent::Code(code.literal.clone())),

        NodeValue::Link(link) => content.push(InlineContent::Link(Link {
            href: link.url.clone(),
            content: collect_inlines(node),
        })),

        NodeValue::Image(link) => content.push(InlineContent::Image(Image {
            src: link.url.clone(),
            alt: plain_text(&collect_inlines(node)),
        })),

        NodeValue::SoftBreak => content.push(InlineContent::text(" ")),

        NodeValue::LineBreak => content.push(InlineContent::HardBreak),

        NodeValue::HtmlInline(html) => content.push(InlineContent::Text(html.clone())),

        _ => {
            // Unknown inline wrapper: keep its content, drop the styling
            for child in node.children() {
                collect_inline(child, content);
            }
        }
    }
}
