use crate::kinds;
use blueprint_api::utils::{full_range, node_range, node_text, unquote_double, unquote_single};
use blueprint_api::{NodeId, NodeKind, Range, ScalarTag, UnifiedNode, UnifiedTree};
use tree_sitter::{Node, Tree};

/// Lowers a tree-sitter YAML tree into a [`UnifiedTree`].
///
/// Only the first document of the stream is kept. Its top-level collection is
/// absorbed into the document root so top-level keys sit at depth 1.
pub(crate) fn convert(tree: &Tree, source: &str) -> UnifiedTree {
    let root = tree.root_node();
    let mut document = UnifiedNode::new(NodeKind::Document, full_range(source), root.kind());
    document.is_error = root.has_error();

    let mut builder = Builder {
        source,
        out: UnifiedTree::new(document),
    };
    let doc_id = builder.out.root_id();

    let mut seen_document = false;
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        match child.kind() {
            kinds::DOCUMENT if !seen_document => {
                seen_document = true;
                builder.absorb_document(child);
            }
            kinds::ERROR => builder.error_region(child, doc_id),
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
    fn absorb_document(&mut self, doc: Node) {
        let root = self.out.root_id();
        let mut cursor = doc.walk();
        for child in doc.named_children(&mut cursor) {
            match child.kind() {
                kinds::BLOCK_NODE | kinds::FLOW_NODE => {
                    let Some(content) = unwrap_node(child) else {
                        continue;
                    };
                    if let Some(node) = self.out.get_mut(root) {
                        node.grammar_kind = content.kind();
                    }
                    match content.kind() {
                        kinds::BLOCK_MAPPING | kinds::FLOW_MAPPING => {
                            self.fill_mapping(content, root)
                        }
                        kinds::BLOCK_SEQUENCE | kinds::FLOW_SEQUENCE => {
                            self.fill_sequence(content, root)
                        }
                        kinds::ERROR => self.error_region(content, root),
                        _ => {
                            let (value, tag) = self.scalar_value(content);
                            if let Some(node) = self.out.get_mut(root) {
                                node.value = Some(value);
                                node.tag = Some(tag);
                            }
                        }
                    }
                }
                kinds::ERROR => self.error_region(child, root),
                _ => {}
            }
        }
    }

    fn convert_value(
        &mut self,
        node: Node,
        parent: NodeId,
        field: Option<(String, Range)>,
        index: Option<usize>,
    ) -> NodeId {
        let content = unwrap_node(node);
        let mut unified = match content {
            None => UnifiedNode::scalar(node_range(&node), node.kind(), String::new(), ScalarTag::Null),
            Some(c) => match c.kind() {
                kinds::BLOCK_MAPPING | kinds::FLOW_MAPPING | kinds::FLOW_PAIR => {
                    UnifiedNode::new(NodeKind::Mapping, node_range(&c), c.kind())
                }
                kinds::BLOCK_SEQUENCE | kinds::FLOW_SEQUENCE => {
                    UnifiedNode::new(NodeKind::Sequence, node_range(&c), c.kind())
                }
                kinds::ERROR if error_holds_pairs(c) => {
                    UnifiedNode::new(NodeKind::Mapping, node_range(&c), c.kind())
                }
                kinds::ERROR => UnifiedNode::scalar(
                    node_range(&c),
                    c.kind(),
                    node_text(&c, self.source).trim().to_string(),
                    ScalarTag::String,
                ),
                _ => {
                    let (value, tag) = self.scalar_value(c);
                    UnifiedNode::scalar(node_range(&c), c.kind(), value, tag)
                }
            },
        };
        if let Some(i) = index {
            unified = unified.with_index(i);
        }
        if let Some((name, key_range)) = field {
            unified = unified.with_field(name, key_range);
        }
        if content.is_some_and(|c| c.is_missing()) {
            unified.is_error = true;
        }

        let id = self.out.add_child(parent, unified);
        if let Some(c) = content {
            match c.kind() {
                kinds::BLOCK_MAPPING | kinds::FLOW_MAPPING => self.fill_mapping(c, id),
                kinds::BLOCK_SEQUENCE | kinds::FLOW_SEQUENCE => self.fill_sequence(c, id),
                kinds::FLOW_PAIR => self.add_pair(c, id),
                kinds::ERROR => self.error_region(c, id),
                _ => {}
            }
        }
        id
    }

    fn fill_mapping(&mut self, mapping: Node, id: NodeId) {
        let mut cursor = mapping.walk();
        for child in mapping.named_children(&mut cursor) {
            match child.kind() {
                kinds::BLOCK_MAPPING_PAIR | kinds::FLOW_PAIR => self.add_pair(child, id),
                // `{ a, b: 1 }`: an entry with no value
                kinds::FLOW_NODE => {
                    let name = self.key_text(child);
                    self.add_empty_mapping(child, id, name, node_range(&child));
                }
                kinds::ERROR => self.error_region(child, id),
                _ => {}
            }
        }
    }

    fn fill_sequence(&mut self, sequence: Node, id: NodeId) {
        let mut cursor = sequence.walk();
        for child in sequence.named_children(&mut cursor) {
            match child.kind() {
                kinds::BLOCK_SEQUENCE_ITEM => self.add_item(child, id),
                kinds::FLOW_NODE | kinds::FLOW_PAIR => {
                    let index = self.next_index(id);
                    self.convert_value(child, id, None, Some(index));
                }
                kinds::ERROR => self.error_region(child, id),
                _ => {}
            }
        }
    }

    fn add_item(&mut self, item: Node, parent: NodeId) {
        let index = self.next_index(parent);
        let mut cursor = item.walk();
        let value = item
            .named_children(&mut cursor)
            .find(|c| c.kind() != kinds::COMMENT);
        match value {
            Some(v) => {
                self.convert_value(v, parent, None, Some(index));
            }
            None => {
                let empty = UnifiedNode::scalar(
                    node_range(&item),
                    kinds::BLOCK_SEQUENCE_ITEM,
                    String::new(),
                    ScalarTag::Null,
                )
                .with_index(index);
                self.out.add_child(parent, empty);
            }
        }
    }

    fn add_pair(&mut self, pair: Node, parent: NodeId) {
        let Some(key) = pair.child_by_field_name("key") else {
            return;
        };
        let name = self.key_text(key);
        let key_range = node_range(&key);
        match pair.child_by_field_name("value") {
            Some(value) if !value.is_missing() => {
                self.convert_value(value, parent, Some((name, key_range)), None);
            }
            _ => self.add_empty_mapping(pair, parent, name, key_range),
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

    /// A key typed without a value yet. It is modelled as an empty mapping
    /// covering the whole pair so the cursor right after the colon lands on it.
    fn add_empty_mapping(&mut self, pair: Node, parent: NodeId, name: String, key_range: Range) {
        let node = UnifiedNode::new(NodeKind::Mapping, node_range(&pair), pair.kind())
            .with_field(name, key_range);
        self.out.add_child(parent, node);
    }

    /// Records an error marker and lifts any recognisable structure inside the
    /// region into `parent`, so half-typed documents keep their valid keys.
    fn error_region(&mut self, err: Node, parent: NodeId) {
        self.out.add_child(
            parent,
            UnifiedNode::new(NodeKind::Error, node_range(&err), kinds::ERROR),
        );
        self.out.mark_error(parent);

        let parent_kind = self.out[parent].kind;
        let takes_pairs = matches!(parent_kind, NodeKind::Document | NodeKind::Mapping);
        let takes_items = matches!(parent_kind, NodeKind::Document | NodeKind::Sequence);

        let mut cursor = err.walk();
        for child in err.named_children(&mut cursor) {
            match child.kind() {
                kinds::BLOCK_MAPPING_PAIR | kinds::FLOW_PAIR if takes_pairs => {
                    self.add_pair(child, parent)
                }
                kinds::BLOCK_SEQUENCE_ITEM if takes_items => self.add_item(child, parent),
                kinds::BLOCK_NODE
                | kinds::FLOW_NODE
                | kinds::BLOCK_MAPPING
                | kinds::FLOW_MAPPING
                | kinds::BLOCK_SEQUENCE
                | kinds::FLOW_SEQUENCE => {
                    let Some(content) = unwrap_node(child) else {
                        continue;
                    };
                    match content.kind() {
                        kinds::BLOCK_MAPPING | kinds::FLOW_MAPPING if takes_pairs => {
                            self.fill_mapping(content, parent)
                        }
                        kinds::BLOCK_SEQUENCE | kinds::FLOW_SEQUENCE if takes_items => {
                            self.fill_sequence(content, parent)
                        }
                        kinds::ERROR => self.error_region(content, parent),
                        _ => {}
                    }
                }
                kinds::ERROR => self.error_region(child, parent),
                _ => {}
            }
        }
    }

    fn next_index(&self, sequence: NodeId) -> usize {
        self.out[sequence]
            .children()
            .iter()
            .filter(|c| self.out[**c].index.is_some())
            .count()
    }

    fn key_text(&self, key: Node) -> String {
        let Some(content) = unwrap_node(key) else {
            return node_text(&key, self.source).trim().to_string();
        };
        match content.kind() {
            kinds::DOUBLE_QUOTE_SCALAR => unquote_double(node_text(&content, self.source)),
            kinds::SINGLE_QUOTE_SCALAR => unquote_single(node_text(&content, self.source)),
            _ => node_text(&content, self.source).trim().to_string(),
        }
    }

    fn scalar_value(&self, scalar: Node) -> (String, ScalarTag) {
        let text = node_text(&scalar, self.source);
        match scalar.kind() {
            kinds::PLAIN_SCALAR => {
                let tag = scalar
                    .named_child(0)
                    .map(|c| plain_tag(c.kind()))
                    .unwrap_or(ScalarTag::String);
                (text.to_string(), tag)
            }
            kinds::DOUBLE_QUOTE_SCALAR => (unquote_double(text), ScalarTag::String),
            kinds::SINGLE_QUOTE_SCALAR => (unquote_single(text), ScalarTag::String),
            kinds::BLOCK_SCALAR => (block_scalar_text(text), ScalarTag::String),
            _ => (text.to_string(), ScalarTag::String),
        }
    }
}

/// Steps through `block_node`/`flow_node` wrappers, skipping properties and comments.
fn unwrap_node(node: Node) -> Option<Node> {
    if !matches!(node.kind(), kinds::BLOCK_NODE | kinds::FLOW_NODE) {
        return Some(node);
    }
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .find(|c| !matches!(c.kind(), kinds::ANCHOR | kinds::TAG | kinds::COMMENT));
    found
}

fn error_holds_pairs(err: Node) -> bool {
    let mut cursor = err.walk();
    let found = err.named_children(&mut cursor).any(|c| {
        matches!(c.kind(), kinds::BLOCK_MAPPING_PAIR | kinds::FLOW_PAIR)
            || unwrap_node(c)
                .is_some_and(|n| matches!(n.kind(), kinds::BLOCK_MAPPING | kinds::FLOW_MAPPING))
    });
    found
}

fn plain_tag(kind: &str) -> ScalarTag {
    match kind {
        kinds::INTEGER_SCALAR => ScalarTag::Int,
        kinds::FLOAT_SCALAR => ScalarTag::Float,
        kinds::BOOLEAN_SCALAR => ScalarTag::Bool,
        kinds::NULL_SCALAR => ScalarTag::Null,
        _ => ScalarTag::String,
    }
}

fn block_scalar_text(raw: &str) -> String {
    let mut lines = raw.lines();
    let folded = lines.next().is_some_and(|header| header.trim_start().starts_with('>'));
    let body: Vec<&str> = lines.collect();
    let indent = body
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);
    let stripped: Vec<&str> = body
        .iter()
        .map(|l| l.get(indent..).unwrap_or("").trim_end())
        .collect();
    if folded {
        stripped
            .iter()
            .filter(|l| !l.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        stripped.join("\n")
    }
}
