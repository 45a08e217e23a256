use blueprint_api::Position;
use blueprint_core::{CompletionContext, CompletionContextEngine, CoreConfig, DocumentContext};
use blueprint_jsonc::JsoncAdapter;
use blueprint_yaml::YamlAdapter;
use std::sync::Arc;

/// Marks the cursor inside test sources.
pub const CURSOR: &str = "<|>";

/// Strips the cursor marker and returns the text plus the 1-based position it stood at.
#[allow(dead_code)]
pub fn split_cursor(marked: &str) -> (String, Position) {
    let offset = marked.find(CURSOR).expect("source has a cursor marker");
    let before = &marked[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = offset - line_start + 1;
    let text = marked.replacen(CURSOR, "", 1);
    (text, Position::new(line, column))
}

#[allow(dead_code)]
pub fn yaml_doc(content: &str) -> DocumentContext {
    let adapter = YamlAdapter::new().expect("yaml grammar loads");
    DocumentContext::open(
        "file:///test/blueprint.yaml",
        Arc::new(adapter),
        CoreConfig::default(),
        content,
        1,
    )
}

#[allow(dead_code)]
pub fn jsonc_doc(content: &str) -> DocumentContext {
    let adapter = JsoncAdapter::new().expect("jsonc grammar loads");
    DocumentContext::open(
        "file:///test/blueprint.jsonc",
        Arc::new(adapter),
        CoreConfig::default(),
        content,
        1,
    )
}

/// Opens a YAML document from marked source and classifies the cursor.
#[allow(dead_code)]
pub fn classify_yaml(marked: &str) -> CompletionContext {
    let (text, pos) = split_cursor(marked);
    let doc = yaml_doc(&text);
    CompletionContextEngine::new().classify_at(&doc, pos)
}

#[allow(dead_code)]
pub fn classify_jsonc(marked: &str) -> CompletionContext {
    let (text, pos) = split_cursor(marked);
    let doc = jsonc_doc(&text);
    CompletionContextEngine::new().classify_at(&doc, pos)
}
