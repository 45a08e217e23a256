use blueprint_api::{DocumentFormat, Position, Range};
use blueprint_core::util::{byte_col_to_utf16_col, utf16_col_to_byte_col};
use std::path::Path;
use tower_lsp::lsp_types::{self, TextDocumentContentChangeEvent, Url};

/// Format from the client's language id, falling back to the file extension.
pub fn format_for(uri: &Url, language_id: Option<&str>) -> Option<DocumentFormat> {
    language_id
        .and_then(DocumentFormat::from_language_id)
        .or_else(|| DocumentFormat::from_path(Path::new(uri.path())))
}

/// Converts a 0-based UTF-16 protocol position to the core's 1-based byte position.
pub fn to_core_position(content: &str, pos: lsp_types::Position) -> Position {
    let line = pos.line as usize;
    let byte_col = utf16_col_to_byte_col(content, line, pos.character as usize);
    Position::new(line + 1, byte_col + 1)
}

pub fn to_lsp_position(content: &str, line: usize, column: usize) -> lsp_types::Position {
    let line = line.saturating_sub(1);
    let character = byte_col_to_utf16_col(content, line, column.saturating_sub(1));
    lsp_types::Position::new(line as u32, character as u32)
}

pub fn to_lsp_range(content: &str, range: Range) -> lsp_types::Range {
    lsp_types::Range {
        start: to_lsp_position(content, range.start_line, range.start_col),
        end: to_lsp_position(content, range.end_line, range.end_col),
    }
}

/// Byte offset of a protocol position, clamped to the line's end.
fn offset_at(text: &str, position: lsp_types::Position) -> usize {
    let mut line = 0;
    let mut offset = 0;
    let mut chars = text.chars().peekable();

    while line < position.line as usize {
        match chars.next() {
            Some(c) => {
                offset += c.len_utf8();
                if c == '\n' {
                    line += 1;
                }
            }
            None => return offset,
        }
    }

    let mut utf16_count = 0;
    while utf16_count < position.character as usize {
        match chars.next() {
            Some(c) if c != '\n' && c != '\r' => {
                utf16_count += c.len_utf16();
                offset += c.len_utf8();
            }
            _ => break,
        }
    }
    offset
}

/// Applies protocol content changes in order. A change without a range replaces the text.
pub fn apply_changes(content: &str, changes: &[TextDocumentContentChangeEvent]) -> String {
    let mut content = content.to_string();
    for change in changes {
        match change.range {
            Some(range) => {
                let start = offset_at(&content, range.start);
                let end = offset_at(&content, range.end).max(start);
                content.replace_range(start..end, &change.text);
            }
            None => content = change.text.clone(),
        }
    }
    content
}
