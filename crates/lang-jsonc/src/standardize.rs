/// Rewrites JSONC into plain JSON without moving any byte.
///
/// Comments and trailing commas are overwritten with spaces; newlines inside
/// block comments are kept so line numbers stay put.
pub fn standardize(source: &str) -> String {
    let bytes = source.as_bytes();
    let mut out = bytes.to_vec();
    let mut in_string = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            match b {
                b'\\' => i += 1,
                // unterminated strings end at the line break
                b'"' | b'\n' => in_string = false,
                _ => {}
            }
            i += 1;
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                let end = line_comment_end(bytes, i);
                blank(&mut out, i, end);
                i = end;
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let end = block_comment_end(bytes, i + 2);
                blank(&mut out, i, end);
                i = end;
                continue;
            }
            b',' => {
                if let Some(next) = next_significant(bytes, i + 1) {
                    if matches!(bytes[next], b'}' | b']') {
                        out[i] = b' ';
                    }
                }
            }
            _ => {}
        }
        i += 1;
    }

    String::from_utf8(out).unwrap_or_else(|_| source.to_string())
}

fn blank(out: &mut [u8], start: usize, end: usize) {
    for b in &mut out[start..end] {
        if *b != b'\n' && *b != b'\r' {
            *b = b' ';
        }
    }
}

fn line_comment_end(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| b == b'\n')
        .map(|p| from + p)
        .unwrap_or(bytes.len())
}

fn block_comment_end(bytes: &[u8], from: usize) -> usize {
    bytes[from.min(bytes.len())..]
        .windows(2)
        .position(|w| w == b"*/")
        .map(|p| from + p + 2)
        .unwrap_or(bytes.len())
}

fn next_significant(bytes: &[u8], mut i: usize) -> Option<usize> {
    while i < bytes.len() {
        match bytes[i] {
            b' ' | b'\t' | b'\r' | b'\n' => i += 1,
            b'/' if bytes.get(i + 1) == Some(&b'/') => i = line_comment_end(bytes, i),
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = block_comment_end(bytes, i + 2),
            _ => return Some(i),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comments_become_spaces() {
        let src = "{\n  // note\n  \"a\": 1 /* x\n y */\n}";
        let out = standardize(src);
        assert_eq!(out.len(), src.len());
        assert_eq!(out.lines().count(), src.lines().count());
        assert!(!out.contains("//"));
        assert!(!out.contains("/*"));
        assert!(out.contains("\"a\": 1"));
    }

    #[test]
    fn test_trailing_commas_removed() {
        let out = standardize("{\"a\": [1, 2,], \"b\": 3, // c\n}");
        assert_eq!(out, "{\"a\": [1, 2 ], \"b\": 3      \n}");
    }

    #[test]
    fn test_comment_markers_inside_strings_kept() {
        let src = "{\"url\": \"https://example.com\", \"glob\": \"a/*b\"}";
        assert_eq!(standardize(src), src);
    }

    #[test]
    fn test_escaped_quote_does_not_end_string() {
        let src = "{\"a\": \"say \\\"//hi\\\"\"}";
        assert_eq!(standardize(src), src);
    }

    #[test]
    fn test_multibyte_comment_keeps_length() {
        let src = "{\"a\": 1 // héllo ✓\n}";
        let out = standardize(src);
        assert_eq!(out.len(), src.len());
        assert!(out.starts_with("{\"a\": 1 "));
        assert!(out[8..out.len() - 2].bytes().all(|b| b == b' '));
        assert!(out.ends_with("\n}"));
    }
}
