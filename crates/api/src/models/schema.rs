use super::position::{Position, Range};
use std::collections::HashMap;

/// Semantic classification attached to a schema node by whoever built the schema tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaElement {
    /// A substitution already known to reference a property of `resource_name`.
    ResourcePropertySubstitution { resource_name: String },
    Other(String),
}

impl SchemaElement {
    pub fn resource_property_name(&self) -> Option<&str> {
        match self {
            SchemaElement::ResourcePropertySubstitution { resource_name } => Some(resource_name),
            SchemaElement::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaNode {
    /// Slash-separated structural path, e.g. `/resources/orders/spec`.
    pub path: String,
    pub range: Range,
    pub element: SchemaElement,
}

impl SchemaNode {
    pub fn new(path: impl Into<String>, range: Range, element: SchemaElement) -> Self {
        Self {
            path: path.into(),
            range,
            element,
        }
    }

    fn segment_count(&self) -> usize {
        self.path.split('/').filter(|s| !s.is_empty()).count()
    }
}

/// Externally supplied semantic view of a document, used as a fallback when
/// the syntax trees cannot place the cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaTree {
    nodes: Vec<SchemaNode>,
    by_path: HashMap<String, usize>,
}

impl SchemaTree {
    pub fn new(nodes: Vec<SchemaNode>) -> Self {
        let mut by_path = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            by_path.entry(node.path.clone()).or_insert(i);
        }
        Self { nodes, by_path }
    }

    pub fn nodes(&self) -> &[SchemaNode] {
        &self.nodes
    }

    pub fn find_by_path(&self, path: &str) -> Option<&SchemaNode> {
        self.by_path.get(path).map(|&i| &self.nodes[i])
    }

    /// The most specific node whose range contains `pos`; ties go to the later start.
    pub fn deepest_at(&self, pos: Position, leeway: usize) -> Option<&SchemaNode> {
        self.nodes
            .iter()
            .filter(|n| n.range.contains_with_leeway(pos, leeway))
            .max_by_key(|n| (n.segment_count(), n.range.start()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deepest_at_prefers_longer_path() {
        let tree = SchemaTree::new(vec![
            SchemaNode::new(
                "/resources",
                Range::new(2, 1, 20, 1),
                SchemaElement::Other("resources".into()),
            ),
            SchemaNode::new(
                "/resources/orders/spec/handler",
                Range::new(6, 16, 6, 40),
                SchemaElement::ResourcePropertySubstitution {
                    resource_name: "orders".into(),
                },
            ),
        ]);
        let hit = tree.deepest_at(Position::new(6, 20), 0);
        assert_eq!(
            hit.and_then(|n| n.element.resource_property_name()),
            Some("orders")
        );
        assert_eq!(
            tree.deepest_at(Position::new(3, 1), 0).map(|n| n.path.as_str()),
            Some("/resources")
        );
        assert!(tree.find_by_path("/resources").is_some());
        assert!(tree.deepest_at(Position::new(30, 1), 0).is_none());
    }
}
