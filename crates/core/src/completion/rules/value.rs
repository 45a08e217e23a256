use super::{ContextRule, in_substitution};
use crate::completion::patterns::{DEFAULT_VALUE, TRANSFORM_VALUE, VERSION_VALUE};
use crate::completion::{CompletionContext, CompletionContextKind};
use crate::cursor::CursorContext;
use crate::path::{StructuredPath, sections};
use crate::syntax::SyntacticPosition;
use blueprint_api::PathSegment;

/// Types a variable default can be suggested for without a custom type provider.
const CORE_VARIABLE_TYPES: &[&str] = &["string", "integer", "float", "boolean"];

/// Values of well-known fields: annotations, spec fields, `version`,
/// `transform` and defaults of custom-typed variables.
pub struct ValuePositionRule;

impl ContextRule for ValuePositionRule {
    fn name(&self) -> &'static str {
        "value_position"
    }

    fn check(&self, ctx: &CursorContext<'_>) -> Option<CompletionContext> {
        if in_substitution(ctx) {
            return None;
        }
        let path = &ctx.path;
        let position = ctx.position_kind().effective();
        let at_value = position == SyntacticPosition::ValueField;

        if at_value && (path.is_resource_annotations() || path.is_resource_annotation_value()) {
            return Some(CompletionContext::for_path(
                CompletionContextKind::ResourceAnnotationValue,
                path,
            ));
        }

        if at_value && path.is_resource_spec() {
            return Some(CompletionContext::for_path(
                CompletionContextKind::ResourceSpecFieldValue,
                path,
            ));
        }

        if at_value && (path.is_version() || (path.is_empty() && VERSION_VALUE.is_match(ctx.text_before)))
        {
            return Some(CompletionContext::new(CompletionContextKind::VersionValue));
        }

        let in_list = matches!(
            position,
            SyntacticPosition::SequenceItem | SyntacticPosition::StringContent
        );
        if (at_value || in_list)
            && (path.is_transform() || (path.is_empty() && TRANSFORM_VALUE.is_match(ctx.text_before)))
        {
            return Some(CompletionContext::new(CompletionContextKind::TransformValue));
        }

        if at_value
            && (path.is_variable_default()
                || (path.is_variable_definition() && DEFAULT_VALUE.is_match(ctx.text_before)))
            && has_custom_type(ctx, path)
        {
            return Some(CompletionContext::new(CompletionContextKind::VariableDefaultValue));
        }

        None
    }
}

fn has_custom_type(ctx: &CursorContext<'_>, path: &StructuredPath) -> bool {
    let Some(name) = path.variable_name() else {
        return false;
    };
    let type_path = StructuredPath::new(vec![
        PathSegment::Field(sections::VARIABLES.to_string()),
        PathSegment::Field(name.to_string()),
        PathSegment::Field(sections::TYPE.to_string()),
    ]);
    ctx.scalar_at(&type_path)
        .is_some_and(|ty| !CORE_VARIABLE_TYPES.contains(&ty.trim()))
}
