use crate::document::{DocumentContext, DocumentStatus, ParseSnapshot, Resolution, ResolutionSource};
use crate::path::StructuredPath;
use crate::recovery::{effective_indent, recover_parent};
use crate::syntax::{self, SyntacticContext, SyntacticPosition, SyntaxStyle};
use crate::util;
use blueprint_api::{
    DocumentFormat, NodeId, NodeKind, Position, SchemaElement, UnifiedNode, UnifiedTree,
};

/// Snapshot of everything known about one cursor position.
///
/// Built once per request and only read afterwards; every field borrows from
/// the [`DocumentContext`] it was built from.
#[derive(Debug, Clone)]
pub struct CursorContext<'a> {
    pub position: Position,
    pub format: DocumentFormat,
    pub status: DocumentStatus,
    pub content: &'a str,
    pub snapshot: Option<&'a ParseSnapshot>,
    pub node: Option<NodeId>,
    pub path: StructuredPath,
    /// Resolved node followed by its parents, nearest first.
    pub ancestors: Vec<NodeId>,
    pub syntax: SyntacticContext,
    pub line_text: &'a str,
    pub text_before: &'a str,
    pub text_after: &'a str,
    pub schema_element: Option<&'a SchemaElement>,
    pub source: ResolutionSource,
    pub stale: bool,
    /// Indentation of the cursor line as used for recovery.
    pub indent: usize,
    pub tab_width: usize,
}

impl<'a> CursorContext<'a> {
    pub fn build(doc: &'a DocumentContext, position: Position) -> Self {
        let config = doc.config();
        let content = doc.content();
        let line_text = util::line_text(content, position.line).unwrap_or("");
        let (text_before, text_after) = util::split_at_column(line_text, position.column);
        let indent = effective_indent(line_text, position.column, config.tab_width);

        let mut resolution = doc.resolve(position);
        if config.indent_recovery {
            if let Some(recovered) = Self::recover(doc, position, &resolution) {
                resolution = recovered;
            }
        }

        let ancestors: Vec<NodeId> = match (resolution.snapshot, resolution.node) {
            (Some(snapshot), Some(id)) => snapshot.tree.ancestors(id).collect(),
            _ => Vec::new(),
        };
        let ancestor_nodes: Vec<&UnifiedNode> = match resolution.snapshot {
            Some(snapshot) => ancestors.iter().map(|id| &snapshot.tree[*id]).collect(),
            None => Vec::new(),
        };
        let prefix = util::text_before(content, position);
        let syntax = syntax::detect(doc.format(), &ancestor_nodes, text_before, prefix);

        let schema_element = resolution.schema_node.map(|n| &n.element).or_else(|| {
            doc.schema()
                .and_then(|s| s.find_by_path(&resolution.path.to_string()))
                .map(|n| &n.element)
        });

        tracing::debug!(
            position = %position,
            path = %resolution.path,
            source = ?resolution.source,
            stale = resolution.stale,
            syntax = ?syntax.position,
            "resolved cursor context"
        );

        Self {
            position,
            format: doc.format(),
            status: doc.status(),
            content,
            snapshot: resolution.snapshot,
            node: resolution.node,
            path: resolution.path,
            ancestors,
            syntax,
            line_text,
            text_before,
            text_after,
            schema_element,
            source: resolution.source,
            stale: resolution.stale,
            indent,
            tab_width: config.tab_width,
        }
    }

    /// Replaces `resolved` with an indentation guess when the guess is more specific.
    fn recover(
        doc: &'a DocumentContext,
        position: Position,
        resolved: &Resolution<'a>,
    ) -> Option<Resolution<'a>> {
        let snapshot = doc.candidate_snapshot()?;
        let recovered = recover_parent(
            &snapshot.tree,
            doc.content(),
            position,
            doc.config(),
        )?;
        if recovered.path.len() <= resolved.path.len() {
            return None;
        }
        Some(Resolution {
            snapshot: Some(snapshot),
            node: Some(recovered.node),
            path: recovered.path,
            source: ResolutionSource::Indentation,
            stale: true,
            schema_node: None,
        })
    }

    pub fn tree(&self) -> Option<&'a UnifiedTree> {
        self.snapshot.map(|s| &s.tree)
    }

    pub fn node(&self) -> Option<&'a UnifiedNode> {
        let tree = self.tree()?;
        self.node.and_then(|id| tree.get(id))
    }

    pub fn position_kind(&self) -> SyntacticPosition {
        self.syntax.position
    }

    pub fn is_key_position(&self) -> bool {
        self.syntax.position.is_key()
    }

    pub fn style(&self) -> SyntaxStyle {
        self.syntax.style
    }

    pub fn typed_prefix(&self) -> &str {
        &self.syntax.typed_prefix
    }

    /// Path of the mapping a key typed at the cursor would belong to.
    ///
    /// A scalar whose key sits on an earlier line is really a half-typed child
    /// (`metadata:` then `  disp` below it), so its own path is the container.
    /// A scalar on the cursor line is a sibling being edited, so its parent is.
    pub fn key_container_path(&self) -> StructuredPath {
        match self.node() {
            Some(node) if matches!(node.kind, NodeKind::Scalar | NodeKind::Error) => {
                let key_above = node
                    .key_range
                    .is_some_and(|k| k.start_line < self.position.line);
                if key_above {
                    self.path.clone()
                } else {
                    self.path.parent()
                }
            }
            _ => self.path.clone(),
        }
    }

    /// Value of the node at `path` in the resolved tree, if it is a scalar.
    pub fn scalar_at(&self, path: &StructuredPath) -> Option<&'a str> {
        let snapshot = self.snapshot?;
        let id = snapshot.index.find_by_path(path)?;
        let node = &snapshot.tree[id];
        if node.kind == NodeKind::Scalar {
            node.value.as_deref()
        } else {
            None
        }
    }

    /// Visual indentation of the key of the node at `path`.
    pub fn key_indent_of(&self, path: &StructuredPath) -> Option<usize> {
        let snapshot = self.snapshot?;
        let id = snapshot.index.find_by_path(path)?;
        let anchor = snapshot.tree[id].anchor_range();
        let line = util::line_text(self.content, anchor.start_line)?;
        let (before, _) = util::split_at_column(line, anchor.start_col);
        Some(util::visual_width(before, self.tab_width))
    }
}
