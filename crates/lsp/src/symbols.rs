use crate::util::to_lsp_range;
use blueprint_api::{NodeId, NodeKind, ScalarTag, UnifiedTree};
use blueprint_core::DocumentContext;
use tower_lsp::lsp_types::*;

/// Nested outline of the document, one symbol per key or sequence item.
pub fn document_symbols(doc: &DocumentContext) -> Vec<DocumentSymbol> {
    let Some(snapshot) = doc.candidate_snapshot() else {
        return Vec::new();
    };
    let tree = &snapshot.tree;
    children_of(tree, tree.root_id(), doc.content())
}

fn children_of(tree: &UnifiedTree, id: NodeId, content: &str) -> Vec<DocumentSymbol> {
    tree[id]
        .children()
        .iter()
        .filter_map(|child| symbol_for(tree, *child, content))
        .collect()
}

fn symbol_for(tree: &UnifiedTree, id: NodeId, content: &str) -> Option<DocumentSymbol> {
    let node = &tree[id];
    if node.kind == NodeKind::Error {
        return None;
    }
    let name = match (&node.field_name, node.index) {
        (Some(field), _) => field.clone(),
        (None, Some(index)) => format!("[{index}]"),
        (None, None) => return None,
    };
    let selection = node.key_range.unwrap_or(node.range);
    let full = node.key_range.map_or(node.range, |k| k.merge(&node.range));
    let children = if node.kind.is_container() {
        Some(children_of(tree, id, content))
    } else {
        None
    };

    #[allow(deprecated)]
    Some(DocumentSymbol {
        name,
        detail: node.value.clone(),
        kind: symbol_kind(node.kind, node.tag),
        tags: None,
        deprecated: None,
        range: to_lsp_range(content, full),
        selection_range: to_lsp_range(content, selection),
        children,
    })
}

fn symbol_kind(kind: NodeKind, tag: Option<ScalarTag>) -> SymbolKind {
    match kind {
        NodeKind::Mapping | NodeKind::Document => SymbolKind::OBJECT,
        NodeKind::Sequence => SymbolKind::ARRAY,
        NodeKind::Scalar => match tag {
            Some(ScalarTag::Int) | Some(ScalarTag::Float) => SymbolKind::NUMBER,
            Some(ScalarTag::Bool) => SymbolKind::BOOLEAN,
            Some(ScalarTag::Null) => SymbolKind::NULL,
            _ => SymbolKind::STRING,
        },
        NodeKind::Error => SymbolKind::NULL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_api::DocumentFormat;
    use blueprint_core::CoreConfig;
    use blueprint_runtime::AdapterRegistry;

    #[test]
    fn test_symbols_follow_structure() {
        let doc = AdapterRegistry::with_default_adapters()
            .open_document(
                "file:///w/b.yaml",
                DocumentFormat::Yaml,
                CoreConfig::default(),
                "version: 2025-05-12\nresources:\n  fn:\n    type: aws/lambda/function\n    dependsOn:\n      - db\n",
                1,
            )
            .unwrap();
        let symbols = document_symbols(&doc);

        assert_eq!(symbols.len(), 2);
        assert_eq!(symbols[0].name, "version");
        assert_eq!(symbols[1].name, "resources");
        assert_eq!(symbols[1].kind, SymbolKind::OBJECT);

        let fn_symbol = &symbols[1].children.as_ref().unwrap()[0];
        assert_eq!(fn_symbol.name, "fn");
        let fields = fn_symbol.children.as_ref().unwrap();
        assert_eq!(fields[0].detail.as_deref(), Some("aws/lambda/function"));
        assert_eq!(fields[1].kind, SymbolKind::ARRAY);
        assert_eq!(fields[1].children.as_ref().unwrap()[0].name, "[0]");
    }
}
