use blueprint_api::Position;

/// Text of the 1-based `line`, without its line terminator.
pub fn line_text(content: &str, line: usize) -> Option<&str> {
    if line == 0 {
        return None;
    }
    content
        .split('\n')
        .nth(line - 1)
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
}

/// Splits `line` at the 1-based byte `column`, clamped to the line and to a char boundary.
pub fn split_at_column(line: &str, column: usize) -> (&str, &str) {
    let mut at = column.saturating_sub(1).min(line.len());
    while !line.is_char_boundary(at) {
        at -= 1;
    }
    line.split_at(at)
}

/// Byte offset of `pos` inside `content`, clamped to the end of its line.
pub fn offset_at(content: &str, pos: Position) -> usize {
    let mut offset = 0;
    for (i, line) in content.split('\n').enumerate() {
        if i + 1 == pos.line {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let (before, _) = split_at_column(line, pos.column);
            return offset + before.len();
        }
        offset += line.len() + 1;
    }
    content.len()
}

/// Everything in the document before the cursor.
pub fn text_before(content: &str, pos: Position) -> &str {
    &content[..offset_at(content, pos)]
}

/// Visual width of `text` with tabs expanded to `tab_width`.
pub fn visual_width(text: &str, tab_width: usize) -> usize {
    text.chars()
        .map(|c| if c == '\t' { tab_width } else { 1 })
        .sum()
}

pub fn leading_indent(line: &str, tab_width: usize) -> usize {
    let ws: String = line.chars().take_while(|c| *c == ' ' || *c == '\t').collect();
    visual_width(&ws, tab_width)
}

/// True for lines carrying no structure: blank or comment-only.
pub fn is_blank_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//")
}

pub fn utf16_col_to_byte_col(content: &str, line: usize, utf16_col: usize) -> usize {
    let line_content = content.lines().nth(line).unwrap_or("");
    let mut curr_utf16 = 0;
    let mut curr_byte = 0;

    for c in line_content.chars() {
        if curr_utf16 >= utf16_col {
            break;
        }
        curr_utf16 += c.len_utf16();
        curr_byte += c.len_utf8();
    }
    curr_byte
}

pub fn byte_col_to_utf16_col(content: &str, line: usize, byte_col: usize) -> usize {
    let line_content = content.lines().nth(line).unwrap_or("");
    let mut curr_utf16 = 0;

    for (idx, c) in line_content.char_indices() {
        if idx >= byte_col {
            break;
        }
        curr_utf16 += c.len_utf16();
    }
    curr_utf16
}
