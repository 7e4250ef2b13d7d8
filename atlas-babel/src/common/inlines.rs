//! Canonical form for inline content.
//!
//! Formats disagree on how they split runs of text: ADF emits one text node per
//! mark combination, comrak splits text around escapes and soft breaks, the wiki
//! scanner splits on every delimiter candidate. Parsers run their output through
//! [`normalize_document`] so that two documents with the same visible structure
//! compare equal.
//!
//! Rules, applied bottom-up:
//! - empty text runs are dropped
//! - wrappers (bold, italic, ...) with no children are dropped; links are kept
//! - adjacent text runs are concatenated
//! - adjacent wrappers of the same kind are merged (links only when the href matches)
//! - adjacent code spans are concatenated

use crate::ir::nodes::*;

pub fn normalize_document(doc: Document) -> Document {
    Document {
        children: normalize_blocks(doc.children),
    }
}

pub fn normalize_blocks(blocks: Vec<DocNode>) -> Vec<DocNode> {
    blocks.into_iter().map(normalize_block).collect()
}

fn normalize_block(block: DocNode) -> DocNode {
    match block {
        DocNode::Heading(heading) => DocNode::Heading(Heading {
            level: heading.level,
            content: normalize_inlines(heading.content),
        }),
        DocNode::Paragraph(paragraph) => {
            DocNode::Paragraph(Paragraph::new(normalize_inlines(paragraph.content)))
        }
        DocNode::List(list) => DocNode::List(List {
            ordered: list.ordered,
            start: list.start,
            items: list
                .items
                .into_iter()
                .map(|item| ListItem {
                    children: normalize_blocks(item.children),
                })
                .collect(),
        }),
        DocNode::BlockQuote(quote) => DocNode::BlockQuote(BlockQuote {
            children: normalize_blocks(quote.children),
        }),
        DocNode::Panel(panel) => DocNode::Panel(Panel {
            kind: panel.kind,
            children: normalize_blocks(panel.children),
        }),
        DocNode::Table(table) => DocNode::Table(Table {
            rows: table
                .rows
                .into_iter()
                .map(|row| TableRow {
                    cells: row
                        .cells
                        .into_iter()
                        .map(|cell| TableCell {
                            header: cell.header,
                            children: normalize_blocks(cell.children),
                        })
                        .collect(),
                })
                .collect(),
        }),
        other @ (DocNode::CodeBlock(_) | DocNode::Rule) => other,
    }
}

pub fn normalize_inlines(content: Vec<InlineContent>) -> Vec<InlineContent> {
    let mut out: Vec<InlineContent> = Vec::with_capacity(content.len());

    for inline in content {
        let inline = match normalize_inline(inline) {
            Some(inline) => inline,
            None => continue,
        };

        match out.pop() {
            Some(previous) => out.extend(merge(previous, inline)),
            None => out.push(inline),
        }
    }

    out
}

fn normalize_inline(inline: InlineContent) -> Option<InlineContent> {
    use InlineContent::{Bold, Italic, Strike, Subscript, Superscript, Text, Underline};

    let wrap = |children: Vec<InlineContent>, build: fn(Vec<InlineContent>) -> InlineContent| {
        let children = normalize_inlines(children);
        if children.is_empty() {
            None
        } else {
            Some(build(children))
        }
    };

    match inline {
        Text(text) if text.is_empty() => None,
        Bold(children) => wrap(children, Bold),
        Italic(children) => wrap(children, Italic),
        Strike(children) => wrap(children, Strike),
        Underline(children) => wrap(children, Underline),
        Superscript(children) => wrap(children, Superscript),
        Subscript(children) => wrap(children, Subscript),
        InlineContent::Link(link) => Some(InlineContent::Link(Link {
            href: link.href,
            content: normalize_inlines(link.content),
        })),
        other => Some(other),
    }
}

/// Merges two adjacent inlines, returning one node when they combine and both
/// otherwise.
fn merge(previous: InlineContent, next: InlineContent) -> Vec<InlineContent> {
    use InlineContent::{Bold, Code, Italic, Strike, Subscript, Superscript, Text, Underline};

    let concat = |mut a: Vec<InlineContent>, b: Vec<InlineContent>| {
        a.extend(b);
        normalize_inlines(a)
    };

    match (previous, next) {
        (Text(mut a), Text(b)) => {
            a.push_str(&b);
            vec![Text(a)]
        }
        (Code(mut a), Code(b)) => {
            a.push_str(&b);
            vec![Code(a)]
        }
        (Bold(a), Bold(b)) => vec![Bold(concat(a, b))],
        (Italic(a), Italic(b)) => vec![Italic(concat(a, b))],
        (Strike(a), Strike(b)) => vec![Strike(concat(a, b))],
        (Underline(a), Underline(b)) => vec![Underline(concat(a, b))],
        (Superscript(a), Superscript(b)) => vec![Superscript(concat(a, b))],
        (Subscript(a), Subscript(b)) => vec![Subscript(concat(a, b))],
        (InlineContent::Link(a), InlineContent::Link(b)) if a.href == b.href => {
            vec![InlineContent::Link(Link {
                href: a.href,
                content: concat(a.content, b.content),
            })]
        }
        (a, b) => vec![a, b],
    }
}
