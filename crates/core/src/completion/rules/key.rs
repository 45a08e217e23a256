use super::{ContextRule, in_substitution};
use crate::completion::{CompletionContext, CompletionContextKind};
use crate::cursor::CursorContext;
use crate::path::StructuredPath;
use crate::syntax::SyntaxStyle;

/// Keys of known definitions, chosen by the mapping a new key would join.
pub struct DefinitionFieldRule;

impl ContextRule for DefinitionFieldRule {
    fn name(&self) -> &'static str {
        "definition_field"
    }

    fn check(&self, ctx: &CursorContext<'_>) -> Option<CompletionContext> {
        if !ctx.is_key_position() || in_substitution(ctx) {
            return None;
        }
        let container = ctx.key_container_path();
        let kind = key_kind(&container, ctx)?;
        Some(CompletionContext::for_path(kind, &container))
    }
}

fn key_kind(path: &StructuredPath, ctx: &CursorContext<'_>) -> Option<CompletionContextKind> {
    use CompletionContextKind::*;

    let kind = if path.is_resource_spec() {
        ResourceSpecField
    } else if path.is_resource_annotations() {
        ResourceAnnotationKey
    } else if path.is_resource_labels() {
        ResourceLabelKey
    } else if path.is_resource_metadata() {
        ResourceMetadataField
    } else if path.is_resource_definition() {
        ResourceDefinitionField
    } else if path.is_resource_link_selector() {
        LinkSelectorField
    } else if path.is_variable_definition() {
        VariableDefinitionField
    } else if path.is_value_definition() {
        ValueDefinitionField
    } else if path.is_datasource_definition() {
        DataSourceDefinitionField
    } else if path.is_include_definition() {
        IncludeDefinitionField
    } else if path.is_export_definition() {
        ExportDefinitionField
    } else if path.is_datasource_export_definition() {
        DataSourceExportDefinitionField
    } else if path.is_datasource_metadata() {
        DataSourceMetadataField
    } else if path.is_datasource_filter_definition() {
        DataSourceFilterDefinitionField
    } else if path.is_empty() && (ctx.style() == SyntaxStyle::FlowDelimited || ctx.indent == 0) {
        BlueprintTopLevelField
    } else {
        return None;
    };
    Some(kind)
}
