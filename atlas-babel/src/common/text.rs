//! Plain string helpers used around the conversion pipeline.

/// Normalizes raw input the way a line reader would hand it over: every line is
/// terminated by `\n` (CRLF folded to LF) and empty input stays empty.
pub fn normalize_input(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 1);
    for line in raw.lines() {
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Cuts `text` to at most `max_chars` characters, never splitting a character.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
