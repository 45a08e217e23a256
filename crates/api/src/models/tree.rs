use super::position::{Position, Range};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Handle of a node inside a [`UnifiedTree`]. Only meaningful for the tree that issued it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Mapping,
    Sequence,
    Scalar,
    Error,
}

impl NodeKind {
    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Mapping | NodeKind::Sequence)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarTag {
    String,
    Int,
    Float,
    Bool,
    Null,
}

/// One step of a structural path: a mapping key or a sequence index.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

impl PathSegment {
    pub fn as_field(&self) -> Option<&str> {
        match self {
            PathSegment::Field(name) => Some(name),
            PathSegment::Index(_) => None,
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathSegment::Field(_) => None,
            PathSegment::Index(i) => Some(*i),
        }
    }

    pub fn is_field(&self, name: &str) -> bool {
        self.as_field() == Some(name)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => f.write_str(name),
            PathSegment::Index(i) => write!(f, "{}", i),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnifiedNode {
    pub kind: NodeKind,
    /// Key under which this node sits in its parent mapping.
    pub field_name: Option<String>,
    pub value: Option<String>,
    pub tag: Option<ScalarTag>,
    /// Position inside the parent sequence.
    pub index: Option<usize>,
    pub range: Range,
    pub key_range: Option<Range>,
    pub is_error: bool,
    /// Raw node kind reported by the grammar that produced this node.
    pub grammar_kind: &'static str,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    depth: usize,
}

impl UnifiedNode {
    pub fn new(kind: NodeKind, range: Range, grammar_kind: &'static str) -> Self {
        Self {
            kind,
            field_name: None,
            value: None,
            tag: None,
            index: None,
            range,
            key_range: None,
            is_error: kind == NodeKind::Error,
            grammar_kind,
            parent: None,
            children: Vec::new(),
            depth: 0,
        }
    }

    pub fn scalar(range: Range, grammar_kind: &'static str, value: String, tag: ScalarTag) -> Self {
        let mut node = Self::new(NodeKind::Scalar, range, grammar_kind);
        node.value = Some(value);
        node.tag = Some(tag);
        node
    }

    pub fn with_field(mut self, name: impl Into<String>, key_range: Range) -> Self {
        self.field_name = Some(name.into());
        self.key_range = Some(key_range);
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The path step contributed by this node, if any. Error markers and the
    /// document root contribute nothing.
    pub fn segment(&self) -> Option<PathSegment> {
        if self.kind == NodeKind::Error {
            return None;
        }
        if let Some(name) = &self.field_name {
            return Some(PathSegment::Field(name.clone()));
        }
        self.index.map(PathSegment::Index)
    }

    /// Where the node visually begins: its key if it has one, otherwise its value.
    pub fn anchor_range(&self) -> Range {
        self.key_range.unwrap_or(self.range)
    }
}

/// Format-neutral syntax tree of one parse.
///
/// Nodes live in an arena addressed by [`NodeId`]; the root is always the
/// document node at `NodeId(0)`. Parent links are kept so a node's path and
/// ancestors can be recovered without a second walk.
#[derive(Debug, Clone, PartialEq)]
pub struct UnifiedTree {
    nodes: Vec<UnifiedNode>,
}

impl UnifiedTree {
    pub fn new(mut root: UnifiedNode) -> Self {
        root.kind = NodeKind::Document;
        root.parent = None;
        root.children.clear();
        root.depth = 0;
        Self { nodes: vec![root] }
    }

    pub fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    pub fn root(&self) -> &UnifiedNode {
        &self.nodes[0]
    }

    pub fn get(&self, id: NodeId) -> Option<&UnifiedNode> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut UnifiedNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Whether the grammar reported any error while producing this tree.
    pub fn has_error(&self) -> bool {
        self.root().is_error
    }

    pub fn add_child(&mut self, parent: NodeId, mut node: UnifiedNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        node.depth = self.nodes[parent.0].depth + 1;
        node.children.clear();
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn mark_error(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.is_error = true;
        }
    }

    /// Pre-order walk starting at the root, children in source order.
    pub fn walk(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![self.root_id()];
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
            Some(id)
        })
    }

    /// The node itself followed by each parent up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut next = self.get(id).map(|_| id);
        std::iter::from_fn(move || {
            let current = next?;
            next = self.nodes[current.0].parent;
            Some(current)
        })
    }

    pub fn depth(&self, id: NodeId) -> usize {
        self.get(id).map(|n| n.depth).unwrap_or(0)
    }

    pub fn path_of(&self, id: NodeId) -> Vec<PathSegment> {
        let mut segments: Vec<PathSegment> = self
            .ancestors(id)
            .filter_map(|a| self.nodes[a.0].segment())
            .collect();
        segments.reverse();
        segments
    }

    pub fn child_by_field(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.get(id)?
            .children
            .iter()
            .copied()
            .find(|c| self.nodes[c.0].field_name.as_deref() == Some(name))
    }

    /// Follows `segments` down from the root.
    pub fn find_by_segments(&self, segments: &[PathSegment]) -> Option<NodeId> {
        let mut current = self.root_id();
        for segment in segments {
            current = match segment {
                PathSegment::Field(name) => self.child_by_field(current, name)?,
                PathSegment::Index(i) => self.nodes[current.0]
                    .children
                    .iter()
                    .copied()
                    .find(|c| self.nodes[c.0].index == Some(*i))?,
            };
        }
        Some(current)
    }

    /// Ranges of every error marker and of scalars the grammar had to invent,
    /// in document order.
    pub fn error_ranges(&self) -> Vec<Range> {
        self.walk()
            .map(|id| &self.nodes[id.0])
            .filter(|n| n.kind == NodeKind::Error || (n.kind == NodeKind::Scalar && n.is_error))
            .map(|n| n.range)
            .collect()
    }

    pub fn contains(&self, id: NodeId, pos: Position) -> bool {
        self.get(id).is_some_and(|n| n.range.contains(pos))
    }
}

impl Index<NodeId> for UnifiedTree {
    type Output = UnifiedNode;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (UnifiedTree, NodeId, NodeId) {
        let mut tree = UnifiedTree::new(UnifiedNode::new(
            NodeKind::Document,
            Range::new(1, 1, 4, 1),
            "stream",
        ));
        let resources = tree.add_child(
            tree.root_id(),
            UnifiedNode::new(NodeKind::Mapping, Range::new(2, 3, 3, 10), "block_mapping")
                .with_field("resources", Range::new(1, 1, 1, 10)),
        );
        let deps = tree.add_child(
            resources,
            UnifiedNode::new(NodeKind::Sequence, Range::new(3, 3, 3, 10), "flow_sequence")
                .with_field("dependsOn", Range::new(2, 3, 2, 12)),
        );
        let item = tree.add_child(
            deps,
            UnifiedNode::scalar(
                Range::new(3, 4, 3, 9),
                "plain_scalar",
                "store".to_string(),
                ScalarTag::String,
            )
            .with_index(0),
        );
        (tree, resources, item)
    }

    #[test]
    fn test_path_and_depth_agree() {
        let (tree, _, item) = sample();
        let path = tree.path_of(item);
        assert_eq!(
            path,
            vec![
                PathSegment::Field("resources".into()),
                PathSegment::Field("dependsOn".into()),
                PathSegment::Index(0)
            ]
        );
        assert_eq!(tree.depth(item), path.len());
        assert!(tree.path_of(tree.root_id()).is_empty());
    }

    #[test]
    fn test_walk_is_preorder() {
        let (tree, resources, item) = sample();
        let order: Vec<NodeId> = tree.walk().collect();
        assert_eq!(order.len(), 4);
        assert_eq!(order[0], tree.root_id());
        assert_eq!(order[1], resources);
        assert_eq!(order[3], item);
    }

    #[test]
    fn test_ancestors_end_at_root() {
        let (tree, resources, item) = sample();
        let chain: Vec<NodeId> = tree.ancestors(item).collect();
        assert_eq!(chain.first(), Some(&item));
        assert_eq!(chain.last(), Some(&tree.root_id()));
        assert!(chain.contains(&resources));
    }

    #[test]
    fn test_find_by_segments() {
        let (tree, _, item) = sample();
        let found = tree.find_by_segments(&[
            PathSegment::Field("resources".into()),
            PathSegment::Field("dependsOn".into()),
            PathSegment::Index(0),
        ]);
        assert_eq!(found, Some(item));
        assert_eq!(
            tree.find_by_segments(&[PathSegment::Field("missing".into())]),
            None
        );
    }

    #[test]
    fn test_error_marker_has_no_segment() {
        let (mut tree, resources, _) = sample();
        let err = tree.add_child(
            resources,
            UnifiedNode::new(NodeKind::Error, Range::new(3, 11, 3, 14), "ERROR"),
        );
        assert!(tree[err].is_error);
        assert_eq!(tree.path_of(err).len(), 1);
        assert_eq!(tree.error_ranges(), vec![Range::new(3, 11, 3, 14)]);
    }
}
