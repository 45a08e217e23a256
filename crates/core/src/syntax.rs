use blueprint_api::{DocumentFormat, NodeKind, UnifiedNode};
use once_cell::sync::Lazy;
use regex::Regex;

/// Grammar node kinds that put their contents in bracket-delimited style.
const FLOW_GRAMMAR_KINDS: &[&str] = &["flow_mapping", "flow_sequence", "flow_pair"];

static KEY_THEN_COLON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*(?:-\s+)?(?:"(?:[^"\\]|\\.)*"|'[^']*'|[^\s"'#:{}\[\],][^#:{}\[\],]*?)\s*:\s*$"#)
        .expect("valid key regex")
});

static KEY_VALUE_SPLIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*(?:-\s+)?(?:"(?:[^"\\]|\\.)*"|'[^']*'|[^\s"'#:{}\[\],][^#:{}\[\],]*?)\s*:(?:\s+|$)(?P<value>.*)$"#)
        .expect("valid key/value regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxStyle {
    BlockIndentation,
    FlowDelimited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Mapping,
    Sequence,
}

/// Where the cursor sits relative to the surrounding syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntacticPosition {
    KeyField,
    ValueField,
    SequenceItem,
    StringContent,
    EmptyContainer(ContainerKind),
}

impl SyntacticPosition {
    /// Collapses an empty container into the position its first entry would take.
    pub fn effective(self) -> SyntacticPosition {
        match self {
            SyntacticPosition::EmptyContainer(ContainerKind::Mapping) => SyntacticPosition::KeyField,
            SyntacticPosition::EmptyContainer(ContainerKind::Sequence) => {
                SyntacticPosition::SequenceItem
            }
            other => other,
        }
    }

    pub fn is_key(self) -> bool {
        self.effective() == SyntacticPosition::KeyField
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntacticContext {
    pub style: SyntaxStyle,
    pub position: SyntacticPosition,
    /// What the user has typed of the current token, scaffolding stripped.
    pub typed_prefix: String,
}

/// Classifies the cursor from the text before it and the resolved node's ancestors
/// (nearest first). `prefix` is the whole document up to the cursor.
pub fn detect(
    format: DocumentFormat,
    ancestors: &[&UnifiedNode],
    line_before: &str,
    prefix: &str,
) -> SyntacticContext {
    let style = if format.is_flow()
        || ancestors
            .iter()
            .any(|n| FLOW_GRAMMAR_KINDS.contains(&n.grammar_kind))
    {
        SyntaxStyle::FlowDelimited
    } else {
        SyntaxStyle::BlockIndentation
    };

    let scan_source = match style {
        SyntaxStyle::FlowDelimited => prefix,
        SyntaxStyle::BlockIndentation => line_before,
    };
    let scan = scan_brackets(scan_source, format);
    let position = classify(style, ancestors, line_before, prefix, &scan);
    let typed_prefix = typed_prefix(position, line_before);

    SyntacticContext {
        style,
        position,
        typed_prefix,
    }
}

fn classify(
    style: SyntaxStyle,
    ancestors: &[&UnifiedNode],
    line_before: &str,
    prefix: &str,
    scan: &BracketScan,
) -> SyntacticPosition {
    // block style only looks at code on the cursor line; earlier lines may end in comments
    let scope = match style {
        SyntaxStyle::FlowDelimited => prefix,
        SyntaxStyle::BlockIndentation => strip_yaml_comment(line_before),
    };
    let trimmed = scope.trim_end();
    // `${` opens a substitution, not a mapping
    let last = if trimmed.ends_with("${") {
        None
    } else {
        trimmed.chars().last()
    };

    match last {
        Some('[') if !scan.in_string => {
            return SyntacticPosition::EmptyContainer(ContainerKind::Sequence);
        }
        Some('{') if !scan.in_string => {
            return SyntacticPosition::EmptyContainer(ContainerKind::Mapping);
        }
        Some(',') if !scan.in_string => {
            let container = scan.innermost.or_else(|| nearest_container(ancestors));
            if container == Some(ContainerKind::Sequence) {
                return SyntacticPosition::SequenceItem;
            }
            if style == SyntaxStyle::FlowDelimited {
                return SyntacticPosition::KeyField;
            }
        }
        _ => {}
    }

    if scan.in_string && scan.innermost == Some(ContainerKind::Sequence) {
        return SyntacticPosition::StringContent;
    }

    if KEY_THEN_COLON.is_match(line_before) {
        return SyntacticPosition::ValueField;
    }

    if style == SyntaxStyle::BlockIndentation {
        let trimmed = line_before.trim_start();
        if trimmed == "-" || trimmed.starts_with("- ") {
            if !line_before.contains(':') {
                return SyntacticPosition::SequenceItem;
            }
        }
    }

    if line_before.contains(':') {
        SyntacticPosition::ValueField
    } else {
        SyntacticPosition::KeyField
    }
}

fn nearest_container(ancestors: &[&UnifiedNode]) -> Option<ContainerKind> {
    ancestors.iter().find_map(|n| match n.kind {
        NodeKind::Mapping | NodeKind::Document => Some(ContainerKind::Mapping),
        NodeKind::Sequence => Some(ContainerKind::Sequence),
        _ => None,
    })
}

#[derive(Debug, Default)]
struct BracketScan {
    innermost: Option<ContainerKind>,
    in_string: bool,
}

/// Tracks unclosed brackets and double-quoted strings through `text`,
/// skipping comments in the document's comment syntax.
fn scan_brackets(text: &str, format: DocumentFormat) -> BracketScan {
    let bytes = text.as_bytes();
    let mut stack: Vec<ContainerKind> = Vec::new();
    let mut in_string = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            match b {
                b'\\' => i += 1,
                b'"' => in_string = false,
                _ => {}
            }
            i += 1;
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'[' => stack.push(ContainerKind::Sequence),
            b'{' => stack.push(ContainerKind::Mapping),
            b']' | b'}' => {
                stack.pop();
            }
            b'/' if format == DocumentFormat::Jsonc && bytes.get(i + 1) == Some(&b'/') => {
                i = skip_to_line_end(bytes, i);
                continue;
            }
            b'/' if format == DocumentFormat::Jsonc && bytes.get(i + 1) == Some(&b'*') => {
                i = bytes[i + 2..]
                    .windows(2)
                    .position(|w| w == b"*/")
                    .map(|p| i + 2 + p + 2)
                    .unwrap_or(bytes.len());
                continue;
            }
            b'#' if format == DocumentFormat::Yaml
                && (i == 0 || bytes[i - 1] == b' ' || bytes[i - 1] == b'\t') =>
            {
                i = skip_to_line_end(bytes, i);
                continue;
            }
            _ => {}
        }
        i += 1;
    }

    BracketScan {
        innermost: stack.last().copied(),
        in_string,
    }
}

/// Cuts a trailing `#` comment off a block-style line, honouring quotes.
fn strip_yaml_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut quote: Option<u8> = None;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(b'"') if b == b'\\' => i += 1,
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'"' | b'\'' if i == 0 || b" \t:[{,".contains(&bytes[i - 1]) => quote = Some(b),
                b'#' if i == 0 || bytes[i - 1] == b' ' || bytes[i - 1] == b'\t' => {
                    return &line[..i];
                }
                _ => {}
            },
        }
        i += 1;
    }
    line
}

fn skip_to_line_end(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| b == b'\n')
        .map(|p| from + p)
        .unwrap_or(bytes.len())
}

fn strip_quote(text: &str) -> &str {
    text.strip_prefix(['"', '\'']).unwrap_or(text)
}

/// The part of the current token the user has typed so far.
pub fn typed_prefix(position: SyntacticPosition, line_before: &str) -> String {
    let prefix = match position {
        SyntacticPosition::EmptyContainer(_) => "",
        SyntacticPosition::StringContent => line_before
            .rfind('"')
            .map(|i| &line_before[i + 1..])
            .unwrap_or(""),
        SyntacticPosition::ValueField => {
            let value = KEY_VALUE_SPLIT
                .captures(line_before)
                .and_then(|c| c.name("value"))
                .map(|m| m.as_str())
                .or_else(|| line_before.split_once(':').map(|(_, v)| v))
                .unwrap_or("");
            strip_quote(value.trim_start())
        }
        SyntacticPosition::KeyField | SyntacticPosition::SequenceItem => {
            let tail = line_before
                .rfind(['{', '[', ','])
                .map(|i| &line_before[i + 1..])
                .unwrap_or(line_before)
                .trim_start();
            let tail = tail.strip_prefix('-').map(str::trim_start).unwrap_or(tail);
            strip_quote(tail)
        }
    };
    prefix.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(line: &str) -> SyntacticContext {
        detect(DocumentFormat::Yaml, &[], line, line)
    }

    fn jsonc(prefix: &str) -> SyntacticContext {
        let line = prefix.rsplit('\n').next().unwrap_or(prefix);
        detect(DocumentFormat::Jsonc, &[], line, prefix)
    }

    #[test]
    fn test_block_key_and_value_positions() {
        assert_eq!(yaml("    typ").position, SyntacticPosition::KeyField);
        assert_eq!(yaml("    typ").typed_prefix, "typ");
        assert_eq!(yaml("    type: ").position, SyntacticPosition::ValueField);
        assert_eq!(yaml("    type: aws/").typed_prefix, "aws/");
        assert_eq!(yaml("    image: nginx:lat").typed_prefix, "nginx:lat");
        assert_eq!(yaml("  - ").position, SyntacticPosition::SequenceItem);
        assert_eq!(yaml("  - ord").typed_prefix, "ord");
    }

    #[test]
    fn test_sequence_item_with_key_is_a_value() {
        assert_eq!(yaml("  - field: ").position, SyntacticPosition::ValueField);
    }

    #[test]
    fn test_flow_positions() {
        assert_eq!(
            jsonc("{\n  \"a\": [").position,
            SyntacticPosition::EmptyContainer(ContainerKind::Sequence)
        );
        assert_eq!(
            jsonc("{\n  \"a\": {\n    ").position,
            SyntacticPosition::EmptyContainer(ContainerKind::Mapping)
        );
        assert_eq!(jsonc("{\"a\": [\"x\", ").position, SyntacticPosition::SequenceItem);
        assert_eq!(jsonc("{\"a\": 1, ").position, SyntacticPosition::KeyField);
        assert_eq!(jsonc("{\n  \"ver").position, SyntacticPosition::KeyField);
        assert_eq!(jsonc("{\n  \"ver").typed_prefix, "ver");
    }

    #[test]
    fn test_string_inside_array() {
        let ctx = jsonc("{\"exclude\": [\"aud");
        assert_eq!(ctx.position, SyntacticPosition::StringContent);
        assert_eq!(ctx.typed_prefix, "aud");
    }

    #[test]
    fn test_comment_brackets_ignored() {
        let ctx = jsonc("{\n  // [\n  \"a\": 1, ");
        assert_eq!(ctx.position, SyntacticPosition::KeyField);
    }

    #[test]
    fn test_flow_ancestor_switches_style() {
        let node = UnifiedNode::new(
            NodeKind::Sequence,
            blueprint_api::Range::new(1, 12, 1, 20),
            "flow_sequence",
        );
        let ctx = detect(DocumentFormat::Yaml, &[&node], "dependsOn: [a, ", "dependsOn: [a, ");
        assert_eq!(ctx.style, SyntaxStyle::FlowDelimited);
        assert_eq!(ctx.position, SyntacticPosition::SequenceItem);
        assert_eq!(yaml("a: b").style, SyntaxStyle::BlockIndentation);
    }

    #[test]
    fn test_bracket_in_earlier_comment_is_not_a_container() {
        let prefix = "    spec:\n      runtime: nodejs20.x # see [\n      ";
        let ctx = detect(DocumentFormat::Yaml, &[], "      ", prefix);
        assert_eq!(ctx.position, SyntacticPosition::KeyField);

        let prefix = "    spec:\n      runtime: nodejs20.x # e.g. {\n      ";
        let ctx = detect(DocumentFormat::Yaml, &[], "      ", prefix);
        assert_eq!(ctx.position, SyntacticPosition::KeyField);
    }

    #[test]
    fn test_bracket_in_trailing_comment_is_ignored() {
        assert_eq!(yaml("    tags: x # [").position, SyntacticPosition::ValueField);
        assert_eq!(yaml("    tags: [").position, SyntacticPosition::EmptyContainer(ContainerKind::Sequence));
        assert_eq!(strip_yaml_comment("a: \"#[\" # c"), "a: \"#[\" ");
    }

    #[test]
    fn test_substitution_brace_is_not_a_container() {
        assert_eq!(yaml("    handler: ${").position, SyntacticPosition::ValueField);
    }

    #[test]
    fn test_effective_position() {
        assert_eq!(
            SyntacticPosition::EmptyContainer(ContainerKind::Mapping).effective(),
            SyntacticPosition::KeyField
        );
        assert!(SyntacticPosition::EmptyContainer(ContainerKind::Mapping).is_key());
        assert!(!SyntacticPosition::ValueField.is_key());
    }
}
