//! Inline wiki markup scanner
//!
//! Works on one line at a time. Emphasis delimiters (`* _ - + ^ ~`) only open after a
//! word boundary and only close before one, which keeps `well-known` and `snake_case`
//! literal. A backslash escapes the next markup character; a doubled backslash is a
//! forced line break.

use crate::ir::nodes::{Image, InlineContent, Link};

/// Characters a backslash escapes. Anything else keeps the backslash.
pub(crate) const ESCAPABLE: &[char] = &[
    '*', '_', '-', '+', '^', '~', '{', '}', '[', ']', '|', '!', '#', '.',
];

/// Emphasis delimiters and the wrapper each one builds
pub(crate) const DELIMITERS: &[char] = &['*', '_', '-', '+', '^', '~'];

pub fn parse_inlines(text: &str) -> Vec<InlineContent> {
    let chars: Vec<char> = text.chars().collect();
    Scanner { chars: &chars }.parse_range(0, chars.len())
}

struct Scanner<'a> {
    chars: &'a [char],
}

impl Scanner<'_> {
    fn parse_range(&self, start: usize, end: usize) -> Vec<InlineContent> {
        let chars = self.chars;
        let mut content = Vec::new();
        let mut text = String::new();
        let mut i = start;

        while i < end {
            let c = chars[i];
            match c {
                '\\' => {
                    match chars[i + 1..end].first() {
                        Some('\\') => {
                            flush(&mut text, &mut content);
                            content.push(InlineContent::HardBreak);
                        }
                        Some(next) if ESCAPABLE.contains(next) => text.push(*next),
                        Some(next) => {
                            text.push('\\');
                            text.push(*next);
                        }
                        None => {
                            text.push('\\');
                            i += 1;
                            continue;
                        }
                    }
                    i += 2;
                }

                '{' if chars.get(i + 1) == Some(&'{') && i + 1 < end => {
                    match self.find_sequence(i + 2, end, &['}', '}']) {
                        Some(close) => {
                            flush(&mut text, &mut content);
                            content.push(InlineContent::Code(chars[i + 2..close].iter().collect()));
                            i = close + 2;
                        }
                        None => {
                            text.push_str("{{");
                            i += 2;
                        }
                    }
                }

                '[' => match self.parse_link(i, end) {
                    Some((link, next)) => {
                        flush(&mut text, &mut content);
                        content.push(link);
                        i = next;
                    }
                    None => {
                        text.push(c);
                        i += 1;
                    }
                },

                '!' => match self.parse_image(i, end) {
                    Some((image, next)) => {
                        flush(&mut text, &mut content);
                        content.push(image);
                        i = next;
                    }
                    None => {
                        text.push(c);
                        i += 1;
                    }
                },

                _ if DELIMITERS.contains(&c) && self.can_open(i, start, end) => {
                    match self.find_close(c, i + 2, end) {
                        Some(close) => {
                            flush(&mut text, &mut content);
                            let children = self.parse_range(i + 1, close);
                            content.push(wrap(c, children));
                            i = close + 1;
                        }
                        None => {
                            text.push(c);
                            i += 1;
                        }
                    }
                }

                _ => {
                    text.push(c);
                    i += 1;
                }
            }
        }

        flush(&mut text, &mut content);
        content
    }

    fn can_open(&self, i: usize, start: usize, end: usize) -> bool {
        let after_boundary = i == start || !self.chars[i - 1].is_alphanumeric();
        let next = self.chars[i + 1..end].first();
        after_boundary && next.is_some_and(|next| !next.is_whitespace())
    }

    /// First unescaped `delimiter` at or after `from` that can close a span
    fn find_close(&self, delimiter: char, from: usize, end: usize) -> Option<usize> {
        (from..end).find(|&j| {
            self.chars[j] == delimiter
                && !self.chars[j - 1].is_whitespace()
                && !self.is_escaped(j)
                && (j + 1 == end || !self.chars[j + 1].is_alphanumeric())
        })
    }

    fn find_sequence(&self, from: usize, end: usize, sequence: &[char]) -> Option<usize> {
        (from..end.saturating_sub(sequence.len() - 1))
            .find(|&j| self.chars[j..j + sequence.len()] == *sequence)
    }

    fn find_unescaped(&self, target: char, from: usize, end: usize) -> Option<usize> {
        (from..end).find(|&j| self.chars[j] == target && !self.is_escaped(j))
    }

    fn is_escaped(&self, index: usize) -> bool {
        let backslashes = self.chars[..index]
            .iter()
            .rev()
            .take_while(|&&c| c == '\\')
            .count();
        backslashes % 2 == 1
    }

    /// `[text|url]` or `[url]`
    fn parse_link(&self, open: usize, end: usize) -> Option<(InlineContent, usize)> {
        let close = self.find_unescaped(']', open + 1, end)?;
        if close == open + 1 {
            return None;
        }

        let link = match self.find_unescaped('|', open + 1, close) {
            Some(bar) => Link {
                href: self.chars[bar + 1..close].iter().collect::<String>().trim().to_string(),
                content: self.parse_range(open + 1, bar),
            },
            None => {
                let href = self.chars[open + 1..close].iter().collect::<String>();
                let href = href.trim().to_string();
                Link {
                    content: vec![InlineContent::Text(href.clone())],
                    href,
                }
            }
        };

        if link.href.is_empty() {
            return None;
        }
        Some((InlineContent::Link(link), close + 1))
    }

    /// `!src!` or `!src|alt=text,width=..!`
    fn parse_image(&self, open: usize, end: usize) -> Option<(InlineContent, usize)> {
        let close = self.find_unescaped('!', open + 1, end)?;
        let inner: String = self.chars[open + 1..close].iter().collect();
        let (src, params) = match inner.split_once('|') {
            Some((src, params)) => (src, Some(params)),
            None => (inner.as_str(), None),
        };

        if src.is_empty() || src.chars().any(char::is_whitespace) {
            return None;
        }

        let alt = params
            .into_iter()
            .flat_map(|params| params.split(','))
            .filter_map(|param| param.split_once('='))
            .find(|(key, _)| key.trim() == "alt")
            .map(|(_, value)| value.trim().trim_matches('"').to_string())
            .unwrap_or_default();

        Some((
            InlineContent::Image(Image {
                src: src.to_string(),
                alt,
            }),
            close + 1,
        ))
    }
}

fn wrap(delimiter: char, children: Vec<InlineContent>) -> InlineContent {
    match delimiter {
        '*' => InlineContent::Bold(children),
        '_' => InlineContent::Italic(children),
        '-' => InlineContent::Strike(children),
        '+' => InlineContent::Underline(children),
        '^' => InlineContent::Superscript(children),
        _ => InlineContent::Subscript(children),
    }
}

fn flush(text: &mut String, content: &mut Vec<InlineContent>) {
    if !text.is_empty() {
        content.push(InlineContent::Text(std::mem::take(text)));
    }
}
