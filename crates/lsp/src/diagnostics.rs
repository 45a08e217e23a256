use crate::util::to_lsp_range;
use blueprint_core::DocumentContext;
use tower_lsp::lsp_types::*;

const SOURCE: &str = "blueprint-ls";

/// Duplicate keys and syntax errors of `doc`, ready to publish.
pub fn collect(doc: &DocumentContext, uri: &Url) -> Vec<Diagnostic> {
    let content = doc.content();
    let mut diagnostics = Vec::new();

    let duplicates = doc.duplicate_keys();
    for dup in duplicates.iter().filter(|d| !d.is_first) {
        let first = duplicates
            .iter()
            .find(|d| d.is_first && d.key == dup.key && d.parent_path == dup.parent_path);
        let related = first.map(|f| {
            vec![DiagnosticRelatedInformation {
                location: Location {
                    uri: uri.clone(),
                    range: to_lsp_range(content, f.key_range.unwrap_or(f.value_range)),
                },
                message: format!("\"{}\" first defined here", f.key),
            }]
        });

        diagnostics.push(Diagnostic {
            range: to_lsp_range(content, dup.key_range.unwrap_or(dup.value_range)),
            severity: Some(DiagnosticSeverity::WARNING),
            source: Some(SOURCE.to_string()),
            message: format!("Duplicate key \"{}\"", dup.key),
            related_information: related,
            ..Default::default()
        });
    }

    if let Some(current) = doc.current().filter(|c| c.has_error()) {
        let mut ranges = current.tree.error_ranges();
        if ranges.is_empty() {
            // the grammar flagged an error it did not attach to any node we keep
            let root = current.tree.root().range;
            ranges.push(blueprint_api::Range::new(
                root.start_line,
                root.start_col,
                root.start_line,
                root.start_col,
            ));
        }
        for range in ranges {
            diagnostics.push(Diagnostic {
                range: to_lsp_range(content, range),
                severity: Some(DiagnosticSeverity::ERROR),
                source: Some(SOURCE.to_string()),
                message: "Syntax error".to_string(),
                ..Default::default()
            });
        }
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_api::DocumentFormat;
    use blueprint_core::CoreConfig;
    use blueprint_runtime::AdapterRegistry;

    fn open(format: DocumentFormat, content: &str) -> DocumentContext {
        AdapterRegistry::with_default_adapters()
            .open_document("file:///w/b", format, CoreConfig::default(), content, 1)
            .unwrap()
    }

    #[test]
    fn test_duplicate_reported_once_with_related_first() {
        let uri = Url::parse("file:///w/b.yaml").unwrap();
        let doc = open(
            DocumentFormat::Yaml,
            "resources:\n  t:\n    type: a\n  t:\n    type: b\n",
        );
        let diagnostics = collect(&doc, &uri);

        assert_eq!(diagnostics.len(), 1);
        let d = &diagnostics[0];
        assert_eq!(d.severity, Some(DiagnosticSeverity::WARNING));
        assert_eq!(d.range.start, Position::new(3, 2));
        let related = d.related_information.as_ref().unwrap();
        assert_eq!(related[0].location.range.start, Position::new(1, 2));
    }

    #[test]
    fn test_clean_document_has_no_diagnostics() {
        let uri = Url::parse("file:///w/b.jsonc").unwrap();
        let doc = open(DocumentFormat::Jsonc, "{\n  \"version\": \"2025-05-12\"\n}\n");
        assert!(collect(&doc, &uri).is_empty());
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let uri = Url::parse("file:///w/b.jsonc").unwrap();
        let doc = open(DocumentFormat::Jsonc, "{\n  \"version\": ,\n}\n");
        assert!(
            collect(&doc, &uri)
                .iter()
                .any(|d| d.severity == Some(DiagnosticSeverity::ERROR))
        );
    }
}
