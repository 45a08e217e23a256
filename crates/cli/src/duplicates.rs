use blueprint_core::DocumentContext;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Finding {
    key: String,
    parent: String,
    line: usize,
    column: usize,
    first: bool,
}

pub fn run(doc: &DocumentContext, json: bool) -> anyhow::Result<()> {
    let found = findings(doc);
    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }
    if found.is_empty() {
        println!("no duplicate keys");
        return Ok(());
    }
    for f in &found {
        let parent = if f.parent.is_empty() { "/" } else { f.parent.as_str() };
        let marker = if f.first { "first" } else { "duplicate" };
        println!("{}:{}  {}  in {}  ({})", f.line, f.column, f.key, parent, marker);
    }
    Ok(())
}

fn findings(doc: &DocumentContext) -> Vec<Finding> {
    doc.duplicate_keys()
        .into_iter()
        .map(|d| {
            let at = d.key_range.unwrap_or(d.value_range);
            Finding {
                key: d.key,
                parent: d.parent_path.to_string(),
                line: at.start_line,
                column: at.start_col,
                first: d.is_first,
            }
        })
        .collect()
}
