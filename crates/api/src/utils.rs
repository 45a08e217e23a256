use crate::models::Range;
use tree_sitter::Node;

/// Converts a tree-sitter span (0-based rows, byte columns) into a 1-based [`Range`].
pub fn range_from_ts(range: tree_sitter::Range) -> Range {
    Range::new(
        range.start_point.row + 1,
        range.start_point.column + 1,
        range.end_point.row + 1,
        range.end_point.column + 1,
    )
}

pub fn node_range(node: &Node) -> Range {
    range_from_ts(node.range())
}

pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    source.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

/// Range spanning the whole of `source`, end column one past the last byte.
pub fn full_range(source: &str) -> Range {
    let mut last_line = 1;
    let mut last_len = 0;
    for (i, line) in source.split('\n').enumerate() {
        last_line = i + 1;
        last_len = line.len();
    }
    Range::new(1, 1, last_line, last_len + 1)
}

/// Strips surrounding double quotes and resolves the common escapes.
/// A missing closing quote is tolerated.
pub fn unquote_double(raw: &str) -> String {
    let inner = raw.strip_prefix('"').unwrap_or(raw);
    let inner = match inner.strip_suffix('"') {
        // the quote closes the string unless an odd run of backslashes escapes it
        Some(body) if body.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 0 => body,
        _ => inner,
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Strips surrounding single quotes; `''` is the only escape.
pub fn unquote_single(raw: &str) -> String {
    let inner = raw.strip_prefix('\'').unwrap_or(raw);
    let inner = inner.strip_suffix('\'').unwrap_or(inner);
    inner.replace("''", "'")
}
