//! Wiki markup serialization (IR → wiki export)
//!
//! Blocks are separated by blank lines. Text is escaped so that the parser in
//! [`super::parser`] reads it back as text: `{ [ ] | !` are always escaped, emphasis
//! delimiters are escaped unless both neighbours are letters or both are spaces, and
//! a line whose text would read as a list, heading or quote line gets its marker
//! escaped. A literal backslash followed by a markup character cannot be expressed
//! and comes back without the backslash.

use super::inline::DELIMITERS;
use super::parser::find_closing_tag;
use crate::ir::nodes::*;

/// Serialize an IR document to wiki markup
pub fn serialize_to_wiki(doc: &Document) -> String {
    render_blocks(&doc.children, &[])
}

/// `open` holds the macro tags enclosing `blocks`. A macro ends at the first matching
/// tag, so a block that would reopen one of them is spliced into its parent instead.
fn render_blocks(blocks: &[DocNode], open: &[&'static str]) -> String {
    blocks
        .iter()
        .filter_map(|block| render_block(block, open))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_block(block: &DocNode, open: &[&'static str]) -> Option<String> {
    match block {
        DocNode::Heading(heading) => Some(format!(
            "h{}. {}",
            heading.level.clamp(1, 6),
            render_inlines(&heading.content, Mode::Line)
        )),

        DocNode::Paragraph(paragraph) => {
            let text = render_inlines(&paragraph.content, Mode::Block);
            (!text.is_empty()).then_some(text)
        }

        DocNode::List(list) => {
            let mut lines = Vec::new();
            render_list(list, "", &mut lines);
            (!lines.is_empty()).then(|| lines.join("\n"))
        }

        DocNode::CodeBlock(code) => Some(render_code(code, open)),

        DocNode::BlockQuote(quote) => render_macro("quote", &quote.children, open),

        DocNode::Panel(panel) => {
            let tag = match panel.kind {
                PanelKind::Info => "info",
                PanelKind::Note => "note",
                PanelKind::Success => "tip",
                // No error macro in wiki markup
                PanelKind::Warning | PanelKind::Error => "warning",
            };
            render_macro(tag, &panel.children, open)
        }

        DocNode::Table(table) => {
            let rows: Vec<String> = table
                .rows
                .iter()
                .filter(|row| !row.cells.is_empty())
                .map(render_row)
                .collect();
            (!rows.is_empty()).then(|| rows.join("\n"))
        }

        DocNode::Rule => Some("----".to_string()),
    }
}

fn render_macro(tag: &'static str, children: &[DocNode], open: &[&'static str]) -> Option<String> {
    if open.contains(&tag) {
        let body = render_blocks(children, open);
        return (!body.is_empty()).then_some(body);
    }
    let mut inner = open.to_vec();
    inner.push(tag);
    Some(format!(
        "{{{tag}}}\n{}\n{{{tag}}}",
        render_blocks(children, &inner)
    ))
}

/// `{noformat}` takes over when the code holds a `{code}` tag, at the cost of the
/// language. Tags that would still end the block early get a backslash, which stays
/// in the content on import.
fn render_code(code: &CodeBlock, open: &[&'static str]) -> String {
    let holds = |tag: &str| find_closing_tag(&code.content, &format!("{{{tag}}}")).is_some();
    let (tag, opening) = if holds("code") && !holds("noformat") {
        ("noformat", "{noformat}".to_string())
    } else {
        let opening = match &code.language {
            Some(language) => format!("{{code:{language}}}"),
            None => "{code}".to_string(),
        };
        ("code", opening)
    };

    let content = open
        .iter()
        .fold(escape_tag(&code.content, tag), |content, enclosing| {
            escape_tag(&content, enclosing)
        });
    if content.is_empty() {
        format!("{opening}\n{{{tag}}}")
    } else {
        format!("{opening}\n{content}\n{{{tag}}}")
    }
}

fn escape_tag(content: &str, tag: &str) -> String {
    let tag = format!("{{{tag}}}");
    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(index) = find_closing_tag(rest, &tag) {
        out.push_str(&rest[..index]);
        out.push('\\');
        out.push_str(&tag);
        rest = &rest[index + tag.len()..];
    }
    out.push_str(rest);
    out
}

fn render_list(list: &List, prefix: &str, lines: &mut Vec<String>) {
    let marker = format!("{prefix}{}", if list.ordered { '#' } else { '*' });
    for item in &list.items {
        let text = render_inlines(&flatten_blocks(&item.children), Mode::Line);
        if !text.is_empty() {
            lines.push(format!("{marker} {text}"));
        }
        for child in &item.children {
            if let DocNode::List(nested) = child {
                render_list(nested, &marker, lines);
            }
        }
    }
}

fn render_row(row: &TableRow) -> String {
    let mut line = String::new();
    let mut delimiter = "|";
    for cell in &row.cells {
        delimiter = if cell.header { "||" } else { "|" };
        let text = render_inlines(&flatten_blocks(&cell.children), Mode::Cell);
        line.push_str(delimiter);
        line.push_str(if text.is_empty() { " " } else { &text });
    }
    line.push_str(delimiter);
    line
}

/// Collapse blocks to one run of inline content for single-line contexts
///
/// Nested lists are skipped; list rendering emits them as their own lines.
fn flatten_blocks(blocks: &[DocNode]) -> Vec<InlineContent> {
    let mut content = Vec::new();
    for block in blocks {
        let inlines = match block {
            DocNode::Paragraph(paragraph) => paragraph.content.clone(),
            DocNode::Heading(heading) => heading.content.clone(),
            DocNode::CodeBlock(code) => vec![InlineContent::Code(code.content.clone())],
            DocNode::BlockQuote(BlockQuote { children }) | DocNode::Panel(Panel { children, .. }) => {
                flatten_blocks(children)
            }
            DocNode::List(_) | DocNode::Table(_) | DocNode::Rule => continue,
        };
        if inlines.is_empty() {
            continue;
        }
        if !content.is_empty() {
            content.push(InlineContent::HardBreak);
        }
        content.extend(inlines);
    }
    content
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Paragraph text; hard breaks become real line breaks
    Block,
    /// Headings and list items
    Line,
    /// Table cells; like `Line`, and image parameters are dropped since `|` splits cells
    Cell,
}

fn render_inlines(content: &[InlineContent], mode: Mode) -> String {
    let mut writer = InlineWriter::new(mode);
    writer.write_all(content);
    writer.out.trim_end_matches('\n').to_string()
}

struct InlineWriter {
    out: String,
    mode: Mode,
    /// Delimiters of the enclosing spans; `[` while inside link text
    active: Vec<char>,
}

impl InlineWriter {
    fn new(mode: Mode) -> Self {
        InlineWriter {
            out: String::new(),
            mode,
            active: Vec::new(),
        }
    }

    fn nested(&self, marker: char) -> Self {
        let mut active = self.active.clone();
        active.push(marker);
        InlineWriter {
            out: String::new(),
            mode: self.mode,
            active,
        }
    }

    fn write_all(&mut self, content: &[InlineContent]) {
        for inline in content {
            self.write(inline);
        }
    }

    fn write(&mut self, inline: &InlineContent) {
        match inline {
            InlineContent::Text(text) => self.write_text(text),
            InlineContent::Bold(children) => self.write_span('*', children),
            InlineContent::Italic(children) => self.write_span('_', children),
            InlineContent::Strike(children) => self.write_span('-', children),
            InlineContent::Underline(children) => self.write_span('+', children),
            InlineContent::Superscript(children) => self.write_span('^', children),
            InlineContent::Subscript(children) => self.write_span('~', children),
            InlineContent::Code(code) => {
                if !code.is_empty() {
                    self.out.push_str("{{");
                    self.out.push_str(&code.replace('\n', " "));
                    self.out.push_str("}}");
                }
            }
            InlineContent::Link(link) => self.write_link(link),
            InlineContent::Image(image) => {
                self.out.push('!');
                self.out.push_str(&image.src);
                if !image.alt.is_empty() && self.mode != Mode::Cell {
                    self.out.push_str("|alt=");
                    self.out.push_str(&image.alt);
                }
                self.out.push('!');
            }
            InlineContent::HardBreak => {
                if self.mode == Mode::Block && self.active.is_empty() && !self.line_is_blank() {
                    self.out.push('\n');
                } else {
                    self.out.push_str("\\\\");
                }
            }
        }
    }

    /// True while nothing but whitespace has been written since the last newline
    fn line_is_blank(&self) -> bool {
        self.out
            .rsplit('\n')
            .next()
            .map_or(true, |line| line.trim().is_empty())
    }

    fn write_text(&mut self, text: &str) {
        let chars: Vec<char> = text
            .chars()
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();

        // Index of a character that would start a block construct at line start
        let mut block_marker = None;
        if self.line_is_blank() {
            if let Some(first) = chars.iter().position(|c| !c.is_whitespace()) {
                let rest: String = chars[first..].iter().take(4).collect();
                if matches!(chars[first], '#' | '*' | '-') {
                    block_marker = Some(first);
                } else if is_block_prefix(&rest) {
                    // Escape the dot of `h1.` / `bq.`
                    block_marker = Some(first + 2);
                }
            }
        }

        for (i, &c) in chars.iter().enumerate() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            if block_marker == Some(i) || needs_escape(c, prev, next) {
                self.out.push('\\');
            }
            self.out.push(c);
        }
    }

    fn write_span(&mut self, delimiter: char, children: &[InlineContent]) {
        if self.active.contains(&delimiter) {
            self.write_all(children);
            return;
        }

        let mut inner = self.nested(delimiter);
        inner.write_all(children);
        let rendered = inner.out;

        // Delimiters must hug their content
        let trimmed = rendered.trim();
        if trimmed.is_empty() {
            self.out.push_str(&rendered);
            return;
        }
        let leading = &rendered[..rendered.len() - rendered.trim_start().len()];
        let trailing = &rendered[rendered.trim_end().len()..];
        self.out.push_str(leading);
        self.out.push(delimiter);
        self.out.push_str(trimmed);
        self.out.push(delimiter);
        self.out.push_str(trailing);
    }

    fn write_link(&mut self, link: &Link) {
        let mut inner = self.nested('[');
        inner.write_all(&link.content);

        if inner.out.is_empty() || plain_text(&link.content) == link.href {
            self.out.push('[');
            self.out.push_str(&link.href);
            self.out.push(']');
        } else {
            self.out.push('[');
            self.out.push_str(&inner.out);
            self.out.push('|');
            self.out.push_str(&link.href);
            self.out.push(']');
        }
    }
}

/// `h1.` .. `h6.` and `bq.`
fn is_block_prefix(text: &str) -> bool {
    matches!(
        text.as_bytes(),
        [b'h', b'1'..=b'6', b'.', ..] | [b'b', b'q', b'.', ..]
    )
}

fn needs_escape(c: char, prev: Option<char>, next: Option<char>) -> bool {
    match c {
        '{' | '[' | ']' | '|' | '!' => true,
        _ if DELIMITERS.contains(&c) => {
            let both_alphanumeric = prev.is_some_and(char::is_alphanumeric)
                && next.is_some_and(char::is_alphanumeric);
            let both_whitespace =
                prev.is_some_and(char::is_whitespace) && next.is_some_and(char::is_whitespace);
            !(both_alphanumeric || both_whitespace)
        }
        _ => false,
    }
}
