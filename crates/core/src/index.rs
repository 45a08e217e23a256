use crate::path::StructuredPath;
use blueprint_api::{NodeId, NodeKind, Position, Range, UnifiedTree};
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct IndexEntry {
    id: NodeId,
    depth: usize,
    range: Range,
}

/// Position and path lookup over one [`UnifiedTree`].
///
/// Entries are kept sorted by depth and then by start, so a containment scan
/// naturally yields outer nodes before inner ones. Error markers are not indexed.
#[derive(Debug, Clone, Default)]
pub struct PositionIndex {
    entries: Vec<IndexEntry>,
    by_path: HashMap<String, NodeId>,
    max_line: usize,
}

impl PositionIndex {
    pub fn build(tree: &UnifiedTree) -> Self {
        let mut entries = Vec::with_capacity(tree.len());
        let mut by_path = HashMap::new();
        let mut max_line = 0;

        for id in tree.walk() {
            let node = &tree[id];
            if node.kind == NodeKind::Error {
                continue;
            }
            max_line = max_line.max(node.range.end_line);
            entries.push(IndexEntry {
                id,
                depth: node.depth(),
                range: node.range,
            });
            by_path
                .entry(StructuredPath::from_node(tree, id).to_string())
                .or_insert(id);
        }

        entries.sort_by_key(|e| (e.depth, e.range.start_line, e.range.start_col));
        Self {
            entries,
            by_path,
            max_line,
        }
    }

    /// Every indexed node containing `pos`, shallowest first.
    pub fn nodes_at(&self, pos: Position, leeway: usize) -> Vec<NodeId> {
        self.entries
            .iter()
            .filter(|e| e.range.contains_with_leeway(pos, leeway))
            .map(|e| e.id)
            .collect()
    }

    pub fn deepest_node_at(&self, pos: Position, leeway: usize) -> Option<NodeId> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.range.contains_with_leeway(pos, leeway))
            .map(|e| e.id)
    }

    pub fn find_by_path(&self, path: &StructuredPath) -> Option<NodeId> {
        self.by_path.get(&path.to_string()).copied()
    }

    pub fn max_line(&self) -> usize {
        self.max_line
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_api::{ScalarTag, UnifiedNode};

    // resources:
    //   orders:
    //     type: table
    //     spec:
    //       name: x
    fn sample() -> UnifiedTree {
        let mut tree = UnifiedTree::new(UnifiedNode::new(
            NodeKind::Document,
            Range::new(1, 1, 6, 1),
            "stream",
        ));
        let resources = tree.add_child(
            tree.root_id(),
            UnifiedNode::new(NodeKind::Mapping, Range::new(2, 3, 5, 14), "block_mapping")
                .with_field("resources", Range::new(1, 1, 1, 10)),
        );
        let orders = tree.add_child(
            resources,
            UnifiedNode::new(NodeKind::Mapping, Range::new(3, 5, 5, 14), "block_mapping")
                .with_field("orders", Range::new(2, 3, 2, 9)),
        );
        tree.add_child(
            orders,
            UnifiedNode::scalar(Range::new(3, 11, 3, 16), "plain_scalar", "table".into(), ScalarTag::String)
                .with_field("type", Range::new(3, 5, 3, 9)),
        );
        let spec = tree.add_child(
            orders,
            UnifiedNode::new(NodeKind::Mapping, Range::new(5, 7, 5, 14), "block_mapping")
                .with_field("spec", Range::new(4, 5, 4, 9)),
        );
        tree.add_child(
            spec,
            UnifiedNode::scalar(Range::new(5, 13, 5, 14), "plain_scalar", "x".into(), ScalarTag::String)
                .with_field("name", Range::new(5, 7, 5, 11)),
        );
        tree
    }

    #[test]
    fn test_nodes_at_is_ordered_by_depth() {
        let tree = sample();
        let index = PositionIndex::build(&tree);
        let hits = index.nodes_at(Position::new(5, 14), 0);
        let depths: Vec<usize> = hits.iter().map(|id| tree.depth(*id)).collect();
        assert_eq!(depths, vec![0, 1, 2, 3, 4]);
        assert_eq!(index.deepest_node_at(Position::new(5, 14), 0), hits.last().copied());
    }

    #[test]
    fn test_deepest_node_on_scalar() {
        let tree = sample();
        let index = PositionIndex::build(&tree);
        let id = index.deepest_node_at(Position::new(3, 13), 0).unwrap();
        assert_eq!(
            StructuredPath::from_node(&tree, id).to_string(),
            "/resources/orders/type"
        );
    }

    #[test]
    fn test_leeway_reaches_node_start() {
        let tree = sample();
        let index = PositionIndex::build(&tree);
        let strict = index.deepest_node_at(Position::new(3, 10), 0).unwrap();
        let loose = index.deepest_node_at(Position::new(3, 10), 1).unwrap();
        assert_eq!(tree.depth(strict), 2);
        assert_eq!(tree.depth(loose), 3);
    }

    #[test]
    fn test_find_by_path() {
        let tree = sample();
        let index = PositionIndex::build(&tree);
        let spec = index
            .find_by_path(&StructuredPath::parse("/resources/orders/spec"))
            .unwrap();
        assert_eq!(tree[spec].field_name.as_deref(), Some("spec"));
        assert_eq!(index.find_by_path(&StructuredPath::default()), Some(tree.root_id()));
        assert_eq!(index.max_line(), 6);
        assert_eq!(index.len(), tree.len());
    }
}
