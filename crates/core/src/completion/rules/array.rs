use super::{ContextRule, in_substitution};
use crate::completion::patterns::{DEPENDS_ON_LIST, EXCLUDE_LIST};
use crate::completion::{CompletionContext, CompletionContextKind};
use crate::cursor::CursorContext;
use crate::syntax::SyntacticPosition;

/// Items of `linkSelector.exclude` and `dependsOn`, both lists of resource names.
pub struct ArrayValueRule;

impl ContextRule for ArrayValueRule {
    fn name(&self) -> &'static str {
        "array_value"
    }

    fn check(&self, ctx: &CursorContext<'_>) -> Option<CompletionContext> {
        if in_substitution(ctx) {
            return None;
        }
        let in_item = matches!(
            ctx.position_kind().effective(),
            SyntacticPosition::SequenceItem | SyntacticPosition::StringContent
        );
        if !in_item {
            return None;
        }

        let path = &ctx.path;
        if path.is_link_selector_exclude()
            || (path.is_resource_link_selector() && EXCLUDE_LIST.is_match(ctx.text_before))
        {
            return Some(CompletionContext::for_path(
                CompletionContextKind::LinkSelectorExcludeValue,
                path,
            ));
        }
        if path.is_resource_depends_on()
            || (path.is_resource_definition() && DEPENDS_ON_LIST.is_match(ctx.text_before))
        {
            return Some(CompletionContext::for_path(
                CompletionContextKind::ResourceDependsOnValue,
                path,
            ));
        }
        None
    }
}
