mod common;

use blueprint_api::{SchemaElement, SchemaNode, SchemaTree, Range};
use blueprint_core::{CompletionContextEngine, CompletionContextKind};
use common::{classify_jsonc, classify_yaml, split_cursor, yaml_doc};

#[test]
fn given_type_value_when_classify_then_resource_type() {
    let ctx = classify_yaml("version: 2025-05-12\nresources:\n  t:\n    type: <|>");
    assert_eq!(ctx.kind, CompletionContextKind::ResourceType);
    assert_eq!(ctx.resource_name.as_deref(), Some("t"));
}

#[test]
fn given_partial_type_when_classify_then_resource_type() {
    let ctx = classify_yaml("version: 1\nresources:\n  t:\n    type: svc/x<|>\n");
    assert_eq!(ctx.kind, CompletionContextKind::ResourceType);
}

#[test]
fn given_blank_line_under_spec_when_classify_then_spec_field() {
    let ctx = classify_yaml(
        "version: 2025-05-12\nresources:\n  myFunc:\n    type: aws/lambda/function\n    spec:\n      runtime: nodejs20.x\n      <|>",
    );
    assert_eq!(ctx.kind, CompletionContextKind::ResourceSpecField);
    assert_eq!(ctx.resource_name.as_deref(), Some("myFunc"));
}

#[test]
fn given_bracket_in_comment_above_when_classify_blank_line_then_spec_field() {
    let ctx = classify_yaml(
        "resources:\n  fn:\n    type: aws/lambda/function\n    spec:\n      runtime: nodejs20.x # see [\n      <|>",
    );
    assert_eq!(ctx.kind, CompletionContextKind::ResourceSpecField);
    assert_eq!(ctx.resource_name.as_deref(), Some("fn"));
}

#[test]
fn given_blank_line_under_resource_when_classify_then_definition_field() {
    let ctx = classify_yaml("resources:\n  orders:\n    type: aws/dynamodb/table\n    <|>");
    assert_eq!(ctx.kind, CompletionContextKind::ResourceDefinitionField);
    assert_eq!(ctx.resource_name.as_deref(), Some("orders"));
}

#[test]
fn given_empty_annotations_when_classify_then_annotation_key() {
    let ctx = classify_yaml("resources:\n  fn:\n    metadata:\n      annotations:\n        <|>");
    assert_eq!(ctx.kind, CompletionContextKind::ResourceAnnotationKey);
}

#[test]
fn given_empty_document_when_classify_then_top_level_field() {
    let ctx = classify_yaml("<|>");
    assert_eq!(ctx.kind, CompletionContextKind::BlueprintTopLevelField);

    let ctx = classify_yaml("version: 2025-05-12\n<|>");
    assert_eq!(ctx.kind, CompletionContextKind::BlueprintTopLevelField);
}

#[test]
fn given_open_substitution_when_classify_then_substitution_kinds() {
    let ctx = classify_yaml("resources:\n  fn:\n    spec:\n      handler: ${<|>");
    assert_eq!(ctx.kind, CompletionContextKind::StringSubOpen);

    let ctx = classify_yaml("resources:\n  fn:\n    spec:\n      handler: ${resources.<|>");
    assert_eq!(ctx.kind, CompletionContextKind::StringSubResourceRef);

    let ctx = classify_yaml("resources:\n  fn:\n    spec:\n      handler: ${resources.myRes.<|>");
    assert_eq!(ctx.kind, CompletionContextKind::StringSubResourceProperty);
    assert_eq!(ctx.resource_name.as_deref(), Some("myRes"));

    let ctx = classify_yaml("values:\n  v:\n    value: ${datasources.net.<|>");
    assert_eq!(ctx.kind, CompletionContextKind::StringSubDataSourceProperty);
    assert_eq!(ctx.data_source_name.as_deref(), Some("net"));
}

#[test]
fn given_bare_property_when_classify_then_potential_resource() {
    let ctx = classify_yaml("resources:\n  fn:\n    spec:\n      handler: ${orders.spec.<|>");
    assert_eq!(ctx.kind, CompletionContextKind::StringSubPotentialResourceProperty);
    assert_eq!(ctx.potential_resource_name.as_deref(), Some("orders"));
}

#[test]
fn given_short_or_literal_name_when_classify_then_still_potential_resource() {
    for name in ["i", "true", "null"] {
        let ctx = classify_yaml(&format!("x: \"${{{name}.<|>\""));
        assert_eq!(ctx.kind, CompletionContextKind::StringSubPotentialResourceProperty);
        assert_eq!(ctx.potential_resource_name.as_deref(), Some(name));
    }
}

#[test]
fn given_schema_element_when_classify_bare_property_then_resource_property() {
    let (text, pos) =
        split_cursor("resources:\n  fn:\n    spec:\n      handler: ${orders.sp<|>\n");
    let mut doc = yaml_doc(&text);
    let schema = SchemaTree::new(vec![SchemaNode::new(
        "/resources/fn/spec/handler",
        Range::new(4, 16, 4, 28),
        SchemaElement::ResourcePropertySubstitution {
            resource_name: "orders".to_string(),
        },
    )]);
    doc.set_schema(schema, 1);

    let ctx = CompletionContextEngine::new().classify_at(&doc, pos);
    assert_eq!(ctx.kind, CompletionContextKind::StringSubResourceProperty);
    assert_eq!(ctx.resource_name.as_deref(), Some("orders"));
}

#[test]
fn given_jsonc_exclude_string_when_classify_then_exclude_value() {
    let ctx = classify_jsonc(
        "{\n  \"resources\": {\n    \"r\": {\n      \"linkSelector\": {\n        \"exclude\": [\"<|>\"]\n      }\n    }\n  }\n}\n",
    );
    assert_eq!(ctx.kind, CompletionContextKind::LinkSelectorExcludeValue);
    assert_eq!(ctx.resource_name.as_deref(), Some("r"));
}

#[test]
fn given_jsonc_empty_spec_object_when_classify_then_spec_field() {
    let ctx = classify_jsonc(
        "{\n  \"resources\": {\n    \"fn\": {\n      \"type\": \"aws/lambda/function\",\n      \"spec\": {\n        <|>\n      }\n    }\n  }\n}\n",
    );
    assert_eq!(ctx.kind, CompletionContextKind::ResourceSpecField);
    assert_eq!(ctx.resource_name.as_deref(), Some("fn"));
}

#[test]
fn given_depends_on_item_when_classify_then_depends_on_value() {
    let ctx = classify_yaml("resources:\n  fn:\n    dependsOn:\n      - <|>");
    assert_eq!(ctx.kind, CompletionContextKind::ResourceDependsOnValue);
}

#[test]
fn given_filter_field_value_when_classify_then_filter_field() {
    let ctx = classify_yaml(
        "datasources:\n  network:\n    type: aws/vpc\n    filter:\n      field: <|>",
    );
    assert_eq!(ctx.kind, CompletionContextKind::DataSourceFilterField);
    assert_eq!(ctx.data_source_name.as_deref(), Some("network"));
}

#[test]
fn given_exports_indentation_when_classify_then_name_or_field() {
    let source = "datasources:\n  network:\n    type: aws/vpc\n    exports:\n      vpcId:\n        type: string\n";

    let ctx = classify_yaml(&format!("{source}      <|>"));
    assert_eq!(ctx.kind, CompletionContextKind::DataSourceExportName);

    let ctx = classify_yaml(&format!("{source}        <|>"));
    assert_eq!(ctx.kind, CompletionContextKind::DataSourceExportDefinitionField);
}

#[test]
fn given_export_field_reference_when_classify_then_property_kind() {
    let ctx = classify_yaml("exports:\n  tableId:\n    type: string\n    field: resources.orders.<|>");
    assert_eq!(ctx.kind, CompletionContextKind::ExportFieldResourceProperty);
    assert_eq!(ctx.resource_name.as_deref(), Some("orders"));
}

#[test]
fn given_custom_typed_variable_when_classify_default_then_default_value() {
    let ctx = classify_yaml(
        "variables:\n  instanceType:\n    type: aws/ec2/instanceType\n    default: <|>",
    );
    assert_eq!(ctx.kind, CompletionContextKind::VariableDefaultValue);

    let ctx = classify_yaml("variables:\n  region:\n    type: string\n    default: <|>");
    assert!(ctx.is_unknown());
}

#[test]
fn given_plain_value_when_classify_then_unknown() {
    let ctx = classify_yaml("resources:\n  fn:\n    description: hello<|>\n");
    assert!(ctx.is_unknown());
}
