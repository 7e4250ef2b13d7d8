//! ADF parsing (ADF JSON → IR import)
//!
//! Pipeline: JSON text → [`AdfNode`] (serde) → IR
//!
//! ADF stores inline styling as a flat list of marks on each text node; the IR nests
//! wrappers instead. Marks are applied outermost-first, and the normalization pass
//! merges the per-node wrappers back into runs.

use super::schema::{AdfNode, Mark, PanelType, SubSupKind};
use crate::common::inlines::normalize_document;
use crate::error::FormatError;
use crate::ir::nodes::*;

/// Parse ADF JSON text to an IR document
pub fn parse_from_adf(source: &str) -> Result<Document, FormatError> {
    let root: AdfNode =
        serde_json::from_str(source).map_err(|e| FormatError::parse("adf", e.to_string()))?;

    match root {
        AdfNode::Doc { content, .. } => {
            Ok(normalize_document(Document::new(convert_blocks(content))))
        }
        other => Err(FormatError::parse(
            "adf",
            format!(
                "expected a 'doc' root node, found '{}'",
                node_type_name(&other)
            ),
        )),
    }
}

fn node_type_name(node: &AdfNode) -> &'static str {
    match node {
        AdfNode::Doc { .. } => "doc",
        AdfNode::Paragraph { .. } => "paragraph",
        AdfNode::Heading { .. } => "heading",
        AdfNode::BulletList { .. } => "bulletList",
        AdfNode::OrderedList { .. } => "orderedList",
        AdfNode::ListItem { .. } => "listItem",
        AdfNode::CodeBlock { .. } => "codeBlock",
        AdfNode::Blockquote { .. } => "blockquote",
        AdfNode::Panel { .. } => "panel",
        AdfNode::Rule => "rule",
        AdfNode::Table { .. } => "table",
        AdfNode::TableRow { .. } => "tableRow",
        AdfNode::TableHeader { .. } => "tableHeader",
        AdfNode::TableCell { .. } => "tableCell",
        AdfNode::MediaSingle { .. } => "mediaSingle",
        AdfNode::Media { .. } => "media",
        AdfNode::Text { .. } => "text",
        AdfNode::HardBreak => "hardBreak",
        AdfNode::Unsupported => "unsupported",
    }
}

fn convert_blocks(nodes: Vec<AdfNode>) -> Vec<DocNode> {
    let mut blocks = Vec::new();
    for node in nodes {
        convert_block(node, &mut blocks);
    }
    blocks
}

fn convert_block(node: AdfNode, blocks: &mut Vec<DocNode>) {
    match node {
        AdfNode::Paragraph { content } => {
            blocks.push(DocNode::Paragraph(Paragraph::new(convert_inlines(content))))
        }

        AdfNode::Heading { attrs, content } => blocks.push(DocNode::Heading(Heading {
            level: attrs.level.clamp(1, 6),
            content: convert_inlines(content),
        })),

        AdfNode::BulletList { content } => blocks.push(DocNode::List(List {
            ordered: false,
            start: 1,
            items: convert_list_items(content),
        })),

        AdfNode::OrderedList { attrs, content } => blocks.push(DocNode::List(List {
            ordered: true,
            start: attrs.map_or(1, |attrs| attrs.order),
            items: convert_list_items(content),
        })),

        AdfNode::CodeBlock { attrs, content } => {
            let language = attrs
                .and_then(|attrs| attrs.language)
                .filter(|language| !language.is_empty());
            let content = content
                .into_iter()
                .filter_map(|node| match node {
                    AdfNode::Text { text, .. } => Some(text),
                    AdfNode::HardBreak => Some("\n".to_string()),
                    _ => None,
                })
                .collect();
            blocks.push(DocNode::CodeBlock(CodeBlock { language, content }));
        }

        AdfNode::Blockquote { content } => blocks.push(DocNode::BlockQuote(BlockQuote {
            children: convert_blocks(content),
        })),

        AdfNode::Panel { attrs, content } => blocks.push(DocNode::Panel(Panel {
            kind: panel_kind(attrs.panel_type),
            children: convert_blocks(content),
        })),

        AdfNode::Rule => blocks.push(DocNode::Rule),

        AdfNode::Table { content } => {
            let rows = content
                .into_iter()
                .filter_map(|row| match row {
                    AdfNode::TableRow { content } => Some(TableRow {
                        cells: content.into_iter().filter_map(convert_cell).collect(),
                    }),
                    _ => None,
                })
                .collect();
            blocks.push(DocNode::Table(Table { rows }));
        }

        AdfNode::MediaSingle { content, .. } => {
            let images: Vec<InlineContent> =
                content.into_iter().filter_map(convert_media).collect();
            if !images.is_empty() {
                blocks.push(DocNode::Paragraph(Paragraph::new(images)));
            }
        }

        media @ AdfNode::Media { .. } => {
            if let Some(image) = convert_media(media) {
                blocks.push(DocNode::Paragraph(Paragraph::new(vec![image])));
            }
        }

        // Containers out of place: keep their content
        AdfNode::Doc { content, .. } | AdfNode::ListItem { content } => {
            blocks.extend(convert_blocks(content))
        }

        inline @ (AdfNode::Text { .. } | AdfNode::HardBreak) => {
            blocks.push(DocNode::Paragraph(Paragraph::new(convert_inlines(vec![inline]))))
        }

        other => {
            tracing::warn!(node = node_type_name(&other), "skipping unsupported ADF block");
        }
    }
}

fn convert_list_items(nodes: Vec<AdfNode>) -> Vec<ListItem> {
    nodes
        .into_iter()
        .map(|node| match node {
            AdfNode::ListItem { content } => ListItem {
                children: convert_blocks(content),
            },
            other => ListItem {
                children: convert_blocks(vec![other]),
            },
        })
        .collect()
}

fn convert_cell(node: AdfNode) -> Option<TableCell> {
    match node {
        AdfNode::TableHeader { content } => Some(TableCell {
            header: true,
            children: convert_blocks(content),
        }),
        AdfNode::TableCell { content } => Some(TableCell {
            header: false,
            children: convert_blocks(content),
        }),
        _ => None,
    }
}

fn convert_media(node: AdfNode) -> Option<InlineContent> {
    match node {
        AdfNode::Media { attrs } => {
            let src = attrs.url.or(attrs.id)?;
            Some(InlineContent::Image(Image {
                src,
                alt: attrs.alt.unwrap_or_default(),
            }))
        }
        _ => None,
    }
}

fn panel_kind(panel_type: PanelType) -> PanelKind {
    match panel_type {
        PanelType::Info | PanelType::Custom => PanelKind::Info,
        PanelType::Note => PanelKind::Note,
        PanelType::Warning => PanelKind::Warning,
        PanelType::Success => PanelKind::Success,
        PanelType::Error => PanelKind::Error,
    }
}

fn convert_inlines(nodes: Vec<AdfNode>) -> Vec<InlineContent> {
    let mut content = Vec::new();
    for node in nodes {
        match node {
            AdfNode::Text { text, marks } => content.push(apply_marks(text, &marks)),
            AdfNode::HardBreak => content.push(InlineContent::HardBreak),
            media @ AdfNode::Media { .. } => content.extend(convert_media(media)),
            other => {
                tracing::warn!(node = node_type_name(&other), "skipping unsupported ADF inline");
            }
        }
    }
    content
}

/// Rebuild nested IR wrappers from a text node's mark list
fn apply_marks(text: String, marks: &[Mark]) -> InlineContent {
    let mut inline = if marks.contains(&Mark::Code) {
        InlineContent::Code(text)
    } else {
        InlineContent::Text(text)
    };

    for mark in marks.iter().rev() {
        inline = match mark {
            Mark::Strong => InlineContent::Bold(vec![inline]),
            Mark::Em => InlineContent::Italic(vec![inline]),
            Mark::Strike => InlineContent::Strike(vec![inline]),
            Mark::Underline => InlineContent::Underline(vec![inline]),
            Mark::Link { attrs } => InlineContent::Link(Link {
                href: attrs.href.clone(),
                content: vec![inline],
            }),
            Mark::Subsup { attrs } => match attrs.kind {
                SubSupKind::Sub => InlineContent::Subscript(vec![inline]),
                SubSupKind::Sup => InlineContent::Superscript(vec![inline]),
            },
            Mark::Code | Mark::Unsupported => inline,
        };
    }

    inline
}
