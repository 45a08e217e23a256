use crate::kinds;
use blueprint_api::utils::{full_range, node_range, node_text, unquote_double};
use blueprint_api::{NodeId, NodeKind, Range, ScalarTag, UnifiedNode, UnifiedTree};
use tree_sitter::{Node, Tree};

pub(crate) fn convert(tree: &Tree, source: &str) -> UnifiedTree {
    let root = tree.root_node();
    let mut document = UnifiedNode::new(NodeKind::Document, full_range(source), root.kind());
    document.is_error = root.has_error();

    let mut builder = Builder {
        source,
        out: UnifiedTree::new(document),
    };
    let doc_id = builder.out.root_id();

    let mut seen_value = false;
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        match child.kind() {
            kinds::OBJECT | kinds::ARRAY if !seen_value => {
                seen_value = true;
                if let Some(node) = builder.out.get_mut(doc_id) {
                    node.grammar_kind = child.kind();
                }
                if child.kind() == kinds::OBJECT {
                    builder.fill_object(child, doc_id);
                } else {
                    builder.fill_array(child, doc_id);
                }
            }
            kinds::ERROR => builder.error_region(child, doc_id),
            kind if kinds::is_value(kind) && !seen_value => {
                seen_value = true;
                let (value, tag) = builder.scalar_value(child);
                if let Some(node) = builder.out.get_mut(doc_id) {
                    node.value = Some(value);
                    node.tag = Some(tag);
                }
            }
            _ => {}
        }
    }
    builder.out
}

struct Builder<'s> {
    source: &'s str,
    out: UnifiedTree,
}

impl<'s> Builder<'s> {
    fn convert_value(
        &mut self,
        node: Node,
        parent: NodeId,
        field: Option<(String, Range)>,
        index: Option<usize>,
    ) -> NodeId {
        let mut unified = match node.kind() {
            kinds::OBJECT => UnifiedNode::new(NodeKind::Mapping, node_range(&node), node.kind()),
            kinds::ARRAY => UnifiedNode::new(NodeKind::Sequence, node_range(&node), node.kind()),
            kinds::ERROR => UnifiedNode::new(NodeKind::Mapping, node_range(&node), node.kind()),
            _ => {
                let (value, tag) = self.scalar_value(node);
                UnifiedNode::scalar(node_range(&node), node.kind(), value, tag)
            }
        };
        if let Some(i) = index {
            unified = unified.with_index(i);
        }
        if let Some((name, key_range)) = field {
            unified = unified.with_field(name, key_range);
        }
        if node.is_missing() {
            unified.is_error = true;
        }

        let id = self.out.add_child(parent, unified);
        match node.kind() {
            kinds::OBJECT => self.fill_object(node, id),
            kinds::ARRAY => self.fill_array(node, id),
            kinds::ERROR => self.error_region(node, id),
            _ => {}
        }
        id
    }

    fn fill_object(&mut self, object: Node, id: NodeId) {
        let mut cursor = object.walk();
        for child in object.named_children(&mut cursor) {
            match child.kind() {
                kinds::PAIR => self.add_pair(child, id),
                kinds::ERROR => self.error_region(child, id),
                _ => {}
            }
        }
    }

    fn fill_array(&mut self, array: Node, id: NodeId) {
        let mut cursor = array.walk();
        for child in array.named_children(&mut cursor) {
            match child.kind() {
                kinds::ERROR => self.error_region(child, id),
                kinds::COMMENT => {}
                _ => {
                    let index = self.next_index(id);
                    self.convert_value(child, id, None, Some(index));
                }
            }
        }
    }

    fn add_pair(&mut self, pair: Node, parent: NodeId) {
        let Some(key) = pair.child_by_field_name("key") else {
            return;
        };
        let name = unquote_double(node_text(&key, self.source));
        let key_range = node_range(&key);
        match pair.child_by_field_name("value") {
            Some(value) if !value.is_missing() => {
                self.convert_value(value, parent, Some((name, key_range)), None);
            }
            _ => {
                let node = UnifiedNode::new(NodeKind::Mapping, node_range(&pair), pair.kind())
                    .with_field(name, key_range);
                self.out.add_child(parent, node);
            }
        }

        let mut cursor = pair.walk();
        let errors: Vec<Node> = pair
            .named_children(&mut cursor)
            .filter(|c| c.kind() == kinds::ERROR)
            .collect();
        for err in errors {
            self.error_region(err, parent);
        }
    }

    /// Records an error marker, then recovers what it can from the region:
    /// whole pairs, `"key": value` token runs and `"key":` with nothing after it.
    fn error_region(&mut self, err: Node, parent: NodeId) {
        self.out.add_child(
            parent,
            UnifiedNode::new(NodeKind::Error, node_range(&err), kinds::ERROR),
        );
        self.out.mark_error(parent);

        let parent_kind = self.out[parent].kind;
        let takes_pairs = matches!(parent_kind, NodeKind::Document | NodeKind::Mapping);
        let takes_items = matches!(parent_kind, NodeKind::Document | NodeKind::Sequence);

        let children: Vec<Node> = {
            let mut cursor = err.walk();
            err.children(&mut cursor).collect()
        };

        let mut i = 0;
        while i < children.len() {
            let child = children[i];
            let followed_by_colon = children
                .get(i + 1)
                .is_some_and(|n| n.kind() == kinds::COLON);
            match child.kind() {
                kinds::STRING if takes_pairs && followed_by_colon => {
                    let name = unquote_double(node_text(&child, self.source));
                    let key_range = node_range(&child);
                    let value = children.get(i + 2).copied().filter(|n| kinds::is_value(n.kind()));
                    match value {
                        Some(v) => {
                            self.convert_value(v, parent, Some((name, key_range)), None);
                            i += 3;
                        }
                        None => {
                            let colon_range = node_range(&children[i + 1]);
                            let node = UnifiedNode::new(
                                NodeKind::Mapping,
                                key_range.merge(&colon_range),
                                kinds::PAIR,
                            )
                            .with_field(name, key_range);
                            self.out.add_child(parent, node);
                            i += 2;
                        }
                    }
                    continue;
                }
                kinds::PAIR if takes_pairs => self.add_pair(child, parent),
                kinds::OBJECT if takes_pairs => self.fill_object(child, parent),
                kinds::ARRAY if takes_items => self.fill_array(child, parent),
                kinds::ERROR => self.error_region(child, parent),
                _ => {}
            }
            i += 1;
        }
    }

    fn next_index(&self, sequence: NodeId) -> usize {
        self.out[sequence]
            .children()
            .iter()
            .filter(|c| self.out[**c].index.is_some())
            .count()
    }

    fn scalar_value(&self, node: Node) -> (String, ScalarTag) {
        let text = node_text(&node, self.source);
        match node.kind() {
            kinds::STRING => (unquote_double(text), ScalarTag::String),
            kinds::NUMBER => {
                let tag = if text.contains(['.', 'e', 'E']) {
                    ScalarTag::Float
                } else {
                    ScalarTag::Int
                };
                (text.to_string(), tag)
            }
            kinds::TRUE | kinds::FALSE => (text.to_string(), ScalarTag::Bool),
            kinds::NULL => (text.to_string(), ScalarTag::Null),
            _ => (text.trim().to_string(), ScalarTag::String),
        }
    }
}
