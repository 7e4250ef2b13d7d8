//! ADF serialization (IR → ADF export)
//!
//! Pipeline: IR → [`AdfNode`] tree → `serde_json::Value`
//!
//! Nested IR wrappers are flattened into per-text-node mark lists by walking the
//! inline tree with a mark stack.

use super::schema::*;
use crate::error::FormatError;
use crate::ir::nodes::*;

/// Build the ADF `doc` node for an IR document
pub fn serialize_to_adf(doc: &Document) -> AdfNode {
    AdfNode::Doc {
        version: ADF_VERSION,
        content: encode_blocks(&doc.children),
    }
}

/// Serialize an IR document to an ADF JSON value
pub fn encode_adf(doc: &Document) -> Result<serde_json::Value, FormatError> {
    serde_json::to_value(serialize_to_adf(doc)).map_err(|e| FormatError::encode("adf", e.to_string()))
}

fn encode_blocks(blocks: &[DocNode]) -> Vec<AdfNode> {
    let mut nodes = Vec::new();
    for block in blocks {
        encode_block(block, &mut nodes);
    }
    nodes
}

fn encode_block(block: &DocNode, nodes: &mut Vec<AdfNode>) {
    match block {
        DocNode::Heading(heading) => nodes.push(AdfNode::Heading {
            attrs: HeadingAttrs {
                level: heading.level.clamp(1, 6),
            },
            content: encode_inlines(&heading.content),
        }),

        DocNode::Paragraph(paragraph) => {
            let images: Vec<&Image> = paragraph
                .content
                .iter()
                .filter_map(|inline| match inline {
                    InlineContent::Image(image) => Some(image),
                    _ => None,
                })
                .collect();

            // Paragraphs made only of images become media blocks
            if !images.is_empty() && images.len() == paragraph.content.len() {
                nodes.extend(images.into_iter().map(media_single));
            } else {
                nodes.push(AdfNode::Paragraph {
                    content: encode_inlines(&paragraph.content),
                });
            }
        }

        DocNode::List(list) => {
            let content = list.items.iter().map(encode_list_item).collect();
            nodes.push(if list.ordered {
                AdfNode::OrderedList {
                    attrs: Some(OrderedListAttrs { order: list.start }),
                    content,
                }
            } else {
                AdfNode::BulletList { content }
            });
        }

        DocNode::CodeBlock(code) => {
            let content = if code.content.is_empty() {
                vec![]
            } else {
                vec![AdfNode::Text {
                    text: code.content.clone(),
                    marks: vec![],
                }]
            };
            nodes.push(AdfNode::CodeBlock {
                attrs: code.language.as_ref().map(|language| CodeBlockAttrs {
                    language: Some(language.clone()),
                }),
                content,
            });
        }

        DocNode::BlockQuote(quote) => nodes.push(AdfNode::Blockquote {
            content: encode_blocks(&quote.children),
        }),

        DocNode::Panel(panel) => nodes.push(AdfNode::Panel {
            attrs: PanelAttrs {
                panel_type: panel_type(panel.kind),
            },
            content: encode_blocks(&panel.children),
        }),

        DocNode::Table(table) => nodes.push(AdfNode::Table {
            content: table
                .rows
                .iter()
                .map(|row| AdfNode::TableRow {
                    content: row.cells.iter().map(encode_cell).collect(),
                })
                .collect(),
        }),

        DocNode::Rule => nodes.push(AdfNode::Rule),
    }
}

/// List items and table cells must hold at least one block
fn non_empty_blocks(children: &[DocNode]) -> Vec<AdfNode> {
    let content = encode_blocks(children);
    if content.is_empty() {
        vec![AdfNode::Paragraph { content: vec![] }]
    } else {
        content
    }
}

fn encode_list_item(item: &ListItem) -> AdfNode {
    AdfNode::ListItem {
        content: non_empty_blocks(&item.children),
    }
}

fn encode_cell(cell: &TableCell) -> AdfNode {
    let content = non_empty_blocks(&cell.children);
    if cell.header {
        AdfNode::TableHeader { content }
    } else {
        AdfNode::TableCell { content }
    }
}

fn media_single(image: &Image) -> AdfNode {
    AdfNode::MediaSingle {
        attrs: Some(MediaSingleAttrs {
            layout: "center".to_string(),
        }),
        content: vec![AdfNode::Media {
            attrs: MediaAttrs {
                kind: "external".to_string(),
                url: Some(image.src.clone()),
                id: None,
                alt: (!image.alt.is_empty()).then(|| image.alt.clone()),
            },
        }],
    }
}

fn panel_type(kind: PanelKind) -> PanelType {
    match kind {
        PanelKind::Info => PanelType::Info,
        PanelKind::Note => PanelType::Note,
        PanelKind::Warning => PanelType::Warning,
        PanelKind::Success => PanelType::Success,
        PanelKind::Error => PanelType::Error,
    }
}

fn encode_inlines(content: &[InlineContent]) -> Vec<AdfNode> {
    let mut nodes = Vec::new();
    let mut marks = Vec::new();
    for inline in content {
        encode_inline(inline, &mut marks, &mut nodes);
    }
    nodes
}

fn encode_inline(inline: &InlineContent, marks: &mut Vec<Mark>, nodes: &mut Vec<AdfNode>) {
    match inline {
        InlineContent::Text(text) => push_text(text, marks.clone(), nodes),
        InlineContent::Bold(children) => with_mark(Mark::Strong, children, marks, nodes),
        InlineContent::Italic(children) => with_mark(Mark::Em, children, marks, nodes),
        InlineContent::Strike(children) => with_mark(Mark::Strike, children, marks, nodes),
        InlineContent::Underline(children) => with_mark(Mark::Underline, children, marks, nodes),
        InlineContent::Superscript(children) => {
            with_mark(subsup(SubSupKind::Sup), children, marks, nodes)
        }
        InlineContent::Subscript(children) => {
            with_mark(subsup(SubSupKind::Sub), children, marks, nodes)
        }
        InlineContent::Code(code) => {
            // ADF only allows the code mark next to a link
            let mut code_marks: Vec<Mark> = marks
                .iter()
                .filter(|mark| matches!(mark, Mark::Link { .. }))
                .cloned()
                .collect();
            code_marks.push(Mark::Code);
            push_text(code, code_marks, nodes);
        }
        InlineContent::Link(link) => with_mark(
            Mark::Link {
                attrs: LinkAttrs {
                    href: link.href.clone(),
                },
            },
            &link.content,
            marks,
            nodes,
        ),
        InlineContent::Image(image) => {
            // Inline media is not allowed in paragraphs; keep the image as a link
            let label = if image.alt.is_empty() {
                &image.src
            } else {
                &image.alt
            };
            let mut link_marks: Vec<Mark> = marks
                .iter()
                .filter(|mark| !matches!(mark, Mark::Link { .. }))
                .cloned()
                .collect();
            link_marks.push(Mark::Link {
                attrs: LinkAttrs {
                    href: image.src.clone(),
                },
            });
            push_text(label, link_marks, nodes);
        }
        InlineContent::HardBreak => nodes.push(AdfNode::HardBreak),
    }
}

fn subsup(kind: SubSupKind) -> Mark {
    Mark::Subsup {
        attrs: SubSupAttrs { kind },
    }
}

fn with_mark(
    mark: Mark,
    children: &[InlineContent],
    marks: &mut Vec<Mark>,
    nodes: &mut Vec<AdfNode>,
) {
    if marks.contains(&mark) {
        for child in children {
            encode_inline(child, marks, nodes);
        }
        return;
    }

    marks.push(mark);
    for child in children {
        encode_inline(child, marks, nodes);
    }
    marks.pop();
}

fn push_text(text: &str, marks: Vec<Mark>, nodes: &mut Vec<AdfNode>) {
    if !text.is_empty() {
        nodes.push(AdfNode::Text {
            text: text.to_string(),
            marks,
        });
    }
}
