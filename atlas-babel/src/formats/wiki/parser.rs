//! Wiki markup parsing (wiki → IR import)
//!
//! Line-oriented: each line is classified by its leading syntax, consecutive lines of
//! the same kind are grouped, and delimited macros (`{code}`, `{quote}`, panels) consume
//! lines up to their closing tag. Macro bodies that hold blocks are parsed recursively.

use super::inline::parse_inlines;
use crate::common::inlines::normalize_document;
use crate::error::FormatError;
use crate::ir::nodes::*;
use once_cell::sync::Lazy;
use regex::Regex;

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^h([1-6])\.(?:\s+(.*))?$").unwrap());
static BLOCKQUOTE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^bq\.(?:\s+(.*))?$").unwrap());
static RULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-{4,}$").unwrap());
// `-` bullets never nest
static LIST_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(-|[*#]+)\s+(.*)$").unwrap());
static MACRO_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\{(code|noformat|quote|panel|info|note|warning|tip)(?::([^}]*))?\}(.*)$")
        .unwrap()
});

/// Marker runs longer than this read as paragraph text
const MAX_LIST_DEPTH: usize = 32;

/// Parse wiki markup to an IR document
///
/// Every input is accepted; unknown syntax is kept as text.
pub fn parse_from_wiki(source: &str) -> Result<Document, FormatError> {
    let lines: Vec<&str> = source.lines().collect();
    let children = BlockParser::new(&lines).parse();
    Ok(normalize_document(Document::new(children)))
}

fn parse_body(body: &str) -> Vec<DocNode> {
    let lines: Vec<&str> = body.lines().collect();
    BlockParser::new(&lines).parse()
}

struct BlockParser<'a> {
    lines: &'a [&'a str],
    pos: usize,
}

impl<'a> BlockParser<'a> {
    fn new(lines: &'a [&'a str]) -> Self {
        BlockParser { lines, pos: 0 }
    }

    fn parse(mut self) -> Vec<DocNode> {
        let mut blocks = Vec::new();
        while let Some(&line) = self.lines.get(self.pos) {
            let line = line.trim();
            if line.is_empty() {
                self.pos += 1;
                continue;
            }
            self.parse_block(line, &mut blocks);
        }
        blocks
    }

    fn parse_block(&mut self, line: &'a str, blocks: &mut Vec<DocNode>) {
        if let Some(caps) = MACRO_OPEN.captures(line) {
            let name = caps.get(1).map_or("", |m| m.as_str());
            let params = caps.get(2).map(|m| m.as_str());
            let rest = caps.get(3).map_or("", |m| m.as_str());
            self.pos += 1;
            let body = self.collect_macro_body(rest, &format!("{{{name}}}"));
            blocks.push(macro_block(name, params, body));
        } else if let Some(caps) = HEADING.captures(line) {
            self.pos += 1;
            let level = caps[1].parse::<u8>().unwrap_or(1);
            blocks.push(DocNode::Heading(Heading {
                level,
                content: parse_inlines(caps.get(2).map_or("", |m| m.as_str().trim())),
            }));
        } else if let Some(caps) = BLOCKQUOTE_LINE.captures(line) {
            self.pos += 1;
            let content = parse_inlines(caps.get(1).map_or("", |m| m.as_str().trim()));
            let children = if content.is_empty() {
                vec![]
            } else {
                vec![DocNode::Paragraph(Paragraph::new(content))]
            };
            blocks.push(DocNode::BlockQuote(BlockQuote { children }));
        } else if RULE.is_match(line) {
            self.pos += 1;
            blocks.push(DocNode::Rule);
        } else if line.starts_with('|') {
            blocks.push(self.parse_table());
        } else if list_item(line).is_some() {
            blocks.extend(self.parse_lists());
        } else {
            blocks.push(self.parse_paragraph());
        }
    }

    /// Gather the text between an opening macro tag and its closing tag
    ///
    /// `rest` is whatever followed the opening tag on its line. An unclosed macro runs
    /// to the end of the input.
    fn collect_macro_body(&mut self, rest: &str, close: &str) -> String {
        if let Some(index) = find_closing_tag(rest, close) {
            return rest[..index].to_string();
        }

        let mut body: Vec<&str> = Vec::new();
        if !rest.is_empty() {
            body.push(rest);
        }

        while let Some(&line) = self.lines.get(self.pos) {
            self.pos += 1;
            if let Some(index) = find_closing_tag(line, close) {
                let before = &line[..index];
                if !before.is_empty() {
                    body.push(before);
                }
                break;
            }
            body.push(line);
        }

        body.join("\n")
    }

    fn parse_table(&mut self) -> DocNode {
        let mut rows = Vec::new();
        while let Some(&line) = self.lines.get(self.pos) {
            let line = line.trim();
            if !line.starts_with('|') {
                break;
            }
            self.pos += 1;
            let cells: Vec<TableCell> = split_row(line)
                .into_iter()
                .map(|(header, text)| {
                    let content = parse_inlines(text.trim());
                    let children = if content.is_empty() {
                        vec![]
                    } else {
                        vec![DocNode::Paragraph(Paragraph::new(content))]
                    };
                    TableCell { header, children }
                })
                .collect();
            if !cells.is_empty() {
                rows.push(TableRow { cells });
            }
        }
        DocNode::Table(Table { rows })
    }

    /// Consecutive list lines; marker kinds switching at the top level yield sibling lists
    fn parse_lists(&mut self) -> Vec<DocNode> {
        let mut entries = Vec::new();
        while let Some(&line) = self.lines.get(self.pos) {
            let Some(caps) = list_item(line.trim()) else {
                break;
            };
            self.pos += 1;
            entries.push(ListEntry {
                markers: caps[1].to_string(),
                content: parse_inlines(caps[2].trim()),
            });
        }
        build_lists(&entries, 0)
    }

    fn parse_paragraph(&mut self) -> DocNode {
        let mut content = Vec::new();
        let mut first = true;
        while let Some(&line) = self.lines.get(self.pos) {
            let line = line.trim();
            if line.is_empty() || (!first && starts_block(line)) {
                break;
            }
            self.pos += 1;
            if !first {
                content.push(InlineContent::HardBreak);
            }
            content.extend(parse_inlines(line));
            first = false;
        }
        DocNode::Paragraph(Paragraph::new(content))
    }
}

fn starts_block(line: &str) -> bool {
    MACRO_OPEN.is_match(line)
        || HEADING.is_match(line)
        || BLOCKQUOTE_LINE.is_match(line)
        || RULE.is_match(line)
        || line.starts_with('|')
        || list_item(line).is_some()
}

fn list_item(line: &str) -> Option<regex::Captures<'_>> {
    LIST_ITEM
        .captures(line)
        .filter(|caps| caps[1].len() <= MAX_LIST_DEPTH)
}

/// Byte offset of the first `tag` not preceded by a backslash
pub(super) fn find_closing_tag(text: &str, tag: &str) -> Option<usize> {
    text.match_indices(tag)
        .map(|(index, _)| index)
        .find(|&index| !text[..index].ends_with('\\'))
}

fn macro_block(name: &str, params: Option<&str>, body: String) -> DocNode {
    match name {
        "code" | "noformat" => DocNode::CodeBlock(CodeBlock {
            language: if name == "code" {
                params.and_then(code_language)
            } else {
                None
            },
            content: body.trim_matches('\n').to_string(),
        }),
        "quote" => DocNode::BlockQuote(BlockQuote {
            children: parse_body(&body),
        }),
        _ => DocNode::Panel(Panel {
            kind: match name {
                "note" => PanelKind::Note,
                "warning" => PanelKind::Warning,
                "tip" => PanelKind::Success,
                _ => PanelKind::Info,
            },
            children: parse_body(&body),
        }),
    }
}

/// `{code:java}`, `{code:language=java|title=Example}`
fn code_language(params: &str) -> Option<String> {
    params
        .split('|')
        .find_map(|param| match param.split_once('=') {
            Some((key, value)) if key.trim() == "language" => Some(value.trim()),
            Some(_) => None,
            None => Some(param.trim()),
        })
        .filter(|language| !language.is_empty())
        .map(str::to_string)
}

struct ListEntry {
    markers: String,
    content: Vec<InlineContent>,
}

/// Build the lists for entries whose marker run is longer than `depth`
///
/// An entry with exactly `depth + 1` markers starts an item; deeper entries that follow
/// nest inside that item. Deeper entries with no item to nest under get an empty one.
fn build_lists(entries: &[ListEntry], depth: usize) -> Vec<DocNode> {
    let mut lists = Vec::new();
    let mut current: Option<(bool, Vec<ListItem>)> = None;
    let mut i = 0;

    while i < entries.len() {
        let entry = &entries[i];
        let ordered = entry.markers.as_bytes().get(depth) == Some(&b'#');
        let owns_line = entry.markers.len() == depth + 1;

        let nested_start = if owns_line { i + 1 } else { i };
        let mut end = nested_start;
        while end < entries.len() && entries[end].markers.len() > depth + 1 {
            end += 1;
        }

        let mut children = Vec::new();
        if owns_line && !entry.content.is_empty() {
            children.push(DocNode::Paragraph(Paragraph::new(entry.content.clone())));
        }
        children.extend(build_lists(&entries[nested_start..end], depth + 1));
        let item = ListItem { children };

        let same_kind = matches!(&current, Some((kind, _)) if *kind == ordered);
        if !same_kind {
            if let Some((kind, items)) = current.take() {
                lists.push(new_list(kind, items));
            }
        }
        current
            .get_or_insert_with(|| (ordered, Vec::new()))
            .1
            .push(item);
        i = end;
    }

    if let Some((kind, items)) = current {
        lists.push(new_list(kind, items));
    }
    lists
}

fn new_list(ordered: bool, items: Vec<ListItem>) -> DocNode {
    DocNode::List(List {
        ordered,
        start: 1,
        items,
    })
}

/// Split a table row into `(is_header, text)` cells
///
/// `||` opens a header cell and `|` a normal one. Bars inside `[...]` links and
/// escaped bars do not split. Text after the final bar is kept only when non-blank.
fn split_row(line: &str) -> Vec<(bool, String)> {
    let chars: Vec<char> = line.chars().collect();
    let mut cells = Vec::new();
    let mut current: Option<(bool, String)> = None;
    let mut depth = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '\\' && i + 1 < chars.len() {
            if let Some((_, text)) = current.as_mut() {
                text.push(c);
                text.push(chars[i + 1]);
            }
            i += 2;
            continue;
        }
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '|' if depth == 0 => {
                let header = chars.get(i + 1) == Some(&'|');
                cells.extend(current.take());
                current = Some((header, String::new()));
                i += if header { 2 } else { 1 };
                continue;
            }
            _ => {}
        }
        if let Some((_, text)) = current.as_mut() {
            text.push(c);
        }
        i += 1;
    }

    if let Some((header, text)) = current {
        if !text.trim().is_empty() {
            cells.push((header, text));
        }
    }
    cells
}
