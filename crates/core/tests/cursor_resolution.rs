mod common;

use blueprint_api::{NodeKind, Position};
use blueprint_core::{
    CompletionContextEngine, CompletionContextKind, DocumentContext, DocumentStatus,
    ResolutionSource,
};
use common::{jsonc_doc, split_cursor, yaml_doc};

#[test]
fn given_scalar_value_when_resolve_then_path_points_at_field() {
    let doc = yaml_doc("version: 1\nresources:\n  t:\n    type: svc/x\n");
    let ctx = doc.cursor_context(Position::new(4, 16));

    assert_eq!(ctx.path.to_string(), "/resources/t/type");
    assert_eq!(ctx.source, ResolutionSource::Current);
    assert!(!ctx.stale);
    assert_eq!(ctx.node().map(|n| n.kind), Some(NodeKind::Scalar));
    assert_eq!(ctx.text_before, "    type: svc/x");
}

#[test]
fn given_blank_line_when_resolve_then_recovered_from_indentation() {
    let (text, pos) = split_cursor(
        "version: 2025-05-12\nresources:\n  myFunc:\n    type: aws/lambda/function\n    spec:\n      runtime: nodejs20.x\n      <|>",
    );
    assert_eq!(pos, Position::new(7, 7));
    let doc = yaml_doc(&text);
    let ctx = doc.cursor_context(pos);

    assert_eq!(ctx.path.to_string(), "/resources/myFunc/spec");
    assert_eq!(ctx.source, ResolutionSource::Indentation);
    assert!(ctx.stale);
    assert_eq!(ctx.indent, 6);
    assert!(ctx.is_key_position());
}

#[test]
fn given_dedented_line_when_resolve_then_latest_sibling_wins() {
    let (text, pos) = split_cursor(
        "resources:\n  a:\n    spec:\n      x: 1\n  b:\n    type: t\n    <|>",
    );
    let doc = yaml_doc(&text);
    let ctx = doc.cursor_context(pos);
    assert_eq!(ctx.path.to_string(), "/resources/b");
}

#[test]
fn given_deep_indent_after_dedent_when_resolve_then_deepest_earlier_block_wins() {
    let (text, pos) = split_cursor(
        "resources:\n  a:\n    spec:\n      x: 1\n  b:\n    type: t\n      <|>",
    );
    let doc = yaml_doc(&text);
    let ctx = doc.cursor_context(pos);
    assert_eq!(ctx.path.to_string(), "/resources/a/spec");
    assert_eq!(ctx.source, ResolutionSource::Indentation);
}

#[test]
fn given_dedent_closing_enabled_when_resolve_then_closed_blocks_are_skipped() {
    let (text, pos) = split_cursor(
        "resources:\n  a:\n    spec:\n      x: 1\n  b:\n    type: t\n      <|>",
    );
    let mut doc = yaml_doc(&text);
    let mut config = doc.config().clone();
    config.dedent_closes_blocks = true;
    doc.set_config(config);

    let ctx = doc.cursor_context(pos);
    assert_eq!(ctx.path.to_string(), "/resources/b");
}

#[test]
fn given_recovery_disabled_when_resolve_blank_line_then_root() {
    let (text, pos) = split_cursor("resources:\n  fn:\n    type: t\n    <|>");
    let mut doc = yaml_doc(&text);
    let mut config = doc.config().clone();
    config.indent_recovery = false;
    doc.set_config(config);

    let ctx = doc.cursor_context(pos);
    assert!(ctx.path.is_empty());
    assert_eq!(ctx.source, ResolutionSource::Current);
}

#[test]
fn given_broken_edit_when_classify_then_last_valid_structure_is_used() {
    let valid = "resources:\n  fn:\n    type: aws/lambda/function\n    spec:\n      runtime: nodejs20.x\n";
    let mut doc = yaml_doc(valid);
    assert_eq!(doc.status(), DocumentStatus::Valid);

    let (broken, pos) = split_cursor(&format!("{valid}      han<|>"));
    let status = doc.update(broken, 2);
    assert_eq!(status, DocumentStatus::ParsingErrors);
    assert_eq!(doc.last_valid().map(|s| s.version), Some(1));

    let ctx = CompletionContextEngine::new().classify_at(&doc, pos);
    assert_eq!(ctx.kind, CompletionContextKind::ResourceSpecField);
}

#[test]
fn given_jsonc_string_when_resolve_then_array_index_in_path() {
    let doc = jsonc_doc("{\n  \"resources\": {\n    \"r\": {\n      \"dependsOn\": [\"a\", \"b\"]\n    }\n  }\n}\n");
    let ctx = doc.cursor_context(Position::new(4, 28));

    assert_eq!(ctx.path.to_string(), "/resources/r/dependsOn/1");
    assert_eq!(ctx.source, ResolutionSource::Current);
}

#[test]
fn given_position_past_end_when_resolve_then_nothing_panics() {
    let doc = yaml_doc("version: 1\n");
    let ctx = doc.cursor_context(Position::new(40, 3));
    assert!(ctx.path.is_empty());
    assert_eq!(ctx.line_text, "");
}

fn resolve_twice(doc: &DocumentContext, pos: Position) {
    let engine = CompletionContextEngine::new();
    let first = doc.cursor_context(pos);
    let second = doc.cursor_context(pos);
    assert_eq!(first.path, second.path);
    assert_eq!(first.source, second.source);
    assert_eq!(first.stale, second.stale);
    assert_eq!(engine.classify_at(doc, pos), engine.classify_at(doc, pos));
}

#[test]
fn given_same_inputs_when_resolved_twice_then_identical() {
    let valid = "resources:\n  fn:\n    type: aws/lambda/function\n    spec:\n      runtime: nodejs20.x\n";
    let (broken, broken_pos) = split_cursor(&format!("{valid}      han<|>"));
    let (blank, blank_pos) = split_cursor(&format!("{valid}      <|>"));

    let open_broken = || {
        let mut doc = yaml_doc(valid);
        doc.update(broken.clone(), 2);
        doc
    };
    let first = open_broken();
    let second = open_broken();
    assert_eq!(first.status(), DocumentStatus::ParsingErrors);
    resolve_twice(&first, broken_pos);
    assert_eq!(
        first.cursor_context(broken_pos).path,
        second.cursor_context(broken_pos).path
    );
    let engine = CompletionContextEngine::new();
    assert_eq!(
        engine.classify_at(&first, broken_pos),
        engine.classify_at(&second, broken_pos)
    );

    let recovered = yaml_doc(&blank);
    let ctx = recovered.cursor_context(blank_pos);
    assert_eq!(ctx.source, ResolutionSource::Indentation);
    resolve_twice(&recovered, blank_pos);
    assert_eq!(
        ctx.path,
        yaml_doc(&blank).cursor_context(blank_pos).path
    );

    let (json, json_pos) = split_cursor(
        "{\n  \"resources\": {\n    \"r\": {\n      \"dependsOn\": [\"a\", <|>]\n    }\n  }\n}\n",
    );
    let doc = jsonc_doc(&json);
    resolve_twice(&doc, json_pos);
    assert_eq!(
        engine.classify_at(&doc, json_pos),
        engine.classify_at(&jsonc_doc(&json), json_pos)
    );
}
