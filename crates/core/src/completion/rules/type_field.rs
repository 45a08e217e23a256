use super::ContextRule;
use crate::completion::patterns::TYPE_FIELD;
use crate::completion::{CompletionContext, CompletionContextKind};
use crate::cursor::CursorContext;
use crate::path::sections;

/// The value of a `type` field, recognised from the resolved path.
pub struct TypeFieldRule;

impl ContextRule for TypeFieldRule {
    fn name(&self) -> &'static str {
        "type_field"
    }

    fn check(&self, ctx: &CursorContext<'_>) -> Option<CompletionContext> {
        if ctx.is_key_position() {
            return None;
        }
        let path = &ctx.path;
        let kind = if path.is_resource_type() {
            CompletionContextKind::ResourceType
        } else if path.is_datasource_type() {
            CompletionContextKind::DataSourceType
        } else if path.is_variable_type() {
            CompletionContextKind::VariableType
        } else if path.is_value_type() {
            CompletionContextKind::ValueType
        } else if path.is_export_type() {
            CompletionContextKind::ExportType
        } else if path.is_datasource_export_type() {
            CompletionContextKind::DataSourceExportType
        } else {
            return None;
        };
        Some(CompletionContext::for_path(kind, path))
    }
}

/// `type: ` typed on a line whose value has not parsed into a node yet.
/// The section is taken from the enclosing definition.
pub struct TypeFieldTextRule;

impl ContextRule for TypeFieldTextRule {
    fn name(&self) -> &'static str {
        "type_field"
    }

    fn check(&self, ctx: &CursorContext<'_>) -> Option<CompletionContext> {
        if !TYPE_FIELD.is_match(ctx.text_before) {
            return None;
        }
        let path = &ctx.path;
        let kind = if path.is_datasource_export_definition() {
            CompletionContextKind::DataSourceExportType
        } else if path.len() == 2 {
            match path.section()? {
                sections::RESOURCES => CompletionContextKind::ResourceType,
                sections::DATASOURCES => CompletionContextKind::DataSourceType,
                sections::VARIABLES => CompletionContextKind::VariableType,
                sections::VALUES => CompletionContextKind::ValueType,
                sections::EXPORTS => CompletionContextKind::ExportType,
                _ => return None,
            }
        } else {
            return None;
        };
        Some(CompletionContext::for_path(kind, path))
    }
}
