use blueprint_api::Position;
use blueprint_core::{CompletionContextEngine, DocumentContext};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContextReport {
    status: String,
    path: String,
    source: String,
    stale: bool,
    style: String,
    position: String,
    typed_prefix: String,
    kind: String,
    resource_name: Option<String>,
    data_source_name: Option<String>,
    child_name: Option<String>,
    potential_resource_name: Option<String>,
}

pub fn run(doc: &DocumentContext, line: usize, column: usize, json: bool) -> anyhow::Result<()> {
    anyhow::ensure!(line > 0 && column > 0, "line and column are 1-based");
    let report = report(doc, Position::new(line, column));

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    println!("status:    {}", report.status);
    println!("path:      {}", if report.path.is_empty() { "/" } else { report.path.as_str() });
    println!("source:    {}{}", report.source, if report.stale { " (stale)" } else { "" });
    println!("syntax:    {} {}", report.style, report.position);
    println!("prefix:    {:?}", report.typed_prefix);
    println!("context:   {}", report.kind);
    for (label, value) in [
        ("resource", &report.resource_name),
        ("datasource", &report.data_source_name),
        ("child", &report.child_name),
        ("potential", &report.potential_resource_name),
    ] {
        if let Some(value) = value {
            println!("{label:<10} {value}");
        }
    }
    Ok(())
}

fn report(doc: &DocumentContext, pos: Position) -> ContextReport {
    let cursor = doc.cursor_context(pos);
    let context = CompletionContextEngine::new().classify(&cursor);
    ContextReport {
        status: format!("{:?}", doc.status()),
        path: cursor.path.to_string(),
        source: format!("{:?}", cursor.source),
        stale: cursor.stale,
        style: format!("{:?}", cursor.style()),
        position: format!("{:?}", cursor.position_kind()),
        typed_prefix: cursor.typed_prefix().to_string(),
        kind: context.kind.to_string(),
        resource_name: context.resource_name,
        data_source_name: context.data_source_name,
        child_name: context.child_name,
        potential_resource_name: context.potential_resource_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load_document;
    use blueprint_core::CoreConfig;
    use std::io::Write;

    #[test]
    fn test_report_for_type_value() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(file, "resources:\n  t:\n    type: aws/\n").unwrap();

        let doc = load_document(file.path(), CoreConfig::default()).unwrap();
        let report = report(&doc, Position::new(3, 15));
        assert_eq!(report.path, "/resources/t/type");
        assert_eq!(report.kind, "resource_type");
        assert_eq!(report.resource_name.as_deref(), Some("t"));
        assert_eq!(report.typed_prefix, "aws/");
    }
}
