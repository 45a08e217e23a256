use crate::config::CoreConfig;
use crate::path::StructuredPath;
use crate::util::{is_blank_line, leading_indent, line_text, visual_width};
use blueprint_api::{NodeId, Position, Range, UnifiedTree};

/// Parent guessed from indentation when the cursor sits where no node exists yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveredParent {
    pub node: NodeId,
    pub path: StructuredPath,
}

/// Indentation the cursor line is treated as having. On a blank line the
/// cursor column counts, so `      |` after `spec:` reads as six spaces.
pub fn effective_indent(line: &str, column: usize, tab_width: usize) -> usize {
    let visual = leading_indent(line, tab_width);
    if line.trim().is_empty() {
        visual.max(column.saturating_sub(1))
    } else {
        visual
    }
}

/// Finds the deepest container that the cursor line would belong to by indentation.
///
/// A container qualifies when it starts on an earlier line and is indented less
/// than the cursor. Among qualifying containers the deepest wins, then the one
/// that starts last. With `dedent_closes_blocks` set, a container is also
/// rejected once a line between it and the cursor has dedented to its level.
pub fn recover_parent(
    tree: &UnifiedTree,
    content: &str,
    pos: Position,
    config: &CoreConfig,
) -> Option<RecoveredParent> {
    let tab_width = config.tab_width;
    let lines: Vec<&str> = content
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect();
    let cursor_line = line_text(content, pos.line).unwrap_or("");
    let cursor_indent = effective_indent(cursor_line, pos.column, tab_width);

    let mut best: Option<(usize, usize, NodeId)> = None;
    for id in tree.walk() {
        let node = &tree[id];
        if !node.kind.is_container() {
            continue;
        }
        let anchor = node.anchor_range();
        if anchor.start_line >= pos.line {
            continue;
        }
        let indent = anchor_indent(&lines, anchor, tab_width);
        if indent >= cursor_indent {
            continue;
        }
        if config.dedent_closes_blocks
            && closed_before(&lines, anchor.start_line, pos.line, indent, tab_width)
        {
            continue;
        }

        let candidate = (node.depth(), anchor.start_line);
        if best.is_none_or(|(d, l, _)| candidate > (d, l)) {
            best = Some((candidate.0, candidate.1, id));
        }
    }

    best.map(|(_, _, id)| RecoveredParent {
        node: id,
        path: StructuredPath::from_node(tree, id),
    })
}

fn anchor_indent(lines: &[&str], anchor: Range, tab_width: usize) -> usize {
    let line = lines.get(anchor.start_line - 1).copied().unwrap_or("");
    let (before, _) = crate::util::split_at_column(line, anchor.start_col);
    visual_width(before, tab_width)
}

/// Whether a structural line between `from` and `to` (exclusive, 1-based)
/// is indented at or left of `indent`, ending the block opened at `from`.
fn closed_before(lines: &[&str], from: usize, to: usize, indent: usize, tab_width: usize) -> bool {
    (from + 1..to).any(|n| {
        lines
            .get(n - 1)
            .is_some_and(|l| !is_blank_line(l) && leading_indent(l, tab_width) <= indent)
    })
}
