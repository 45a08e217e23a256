use crate::path::StructuredPath;
use blueprint_api::{NodeId, NodeKind, Range, UnifiedTree};
use indexmap::IndexMap;

/// One occurrence of a key that appears more than once in the same mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKey {
    pub key: String,
    /// Path of the mapping holding the repeated key.
    pub parent_path: StructuredPath,
    pub value_range: Range,
    pub key_range: Option<Range>,
    pub is_first: bool,
}

/// Reports every occurrence of every repeated key, grouped per mapping in
/// document order. A key seen once yields nothing.
pub fn find_duplicate_keys(tree: &UnifiedTree) -> Vec<DuplicateKey> {
    let mut findings = Vec::new();

    for id in tree.walk() {
        let node = &tree[id];
        if !matches!(node.kind, NodeKind::Document | NodeKind::Mapping) {
            continue;
        }

        let mut groups: IndexMap<&str, Vec<NodeId>> = IndexMap::new();
        for child in node.children() {
            if let Some(name) = tree[*child].field_name.as_deref() {
                groups.entry(name).or_default().push(*child);
            }
        }

        let parent_path = StructuredPath::from_node(tree, id);
        for (key, occurrences) in groups {
            if occurrences.len() < 2 {
                continue;
            }
            for (i, occurrence) in occurrences.iter().enumerate() {
                let entry = &tree[*occurrence];
                findings.push(DuplicateKey {
                    key: key.to_string(),
                    parent_path: parent_path.clone(),
                    value_range: entry.range,
                    key_range: entry.key_range,
                    is_first: i == 0,
                });
            }
        }
    }

    if !findings.is_empty() {
        tracing::debug!(count = findings.len(), "duplicate keys found");
    }
    findings
}
