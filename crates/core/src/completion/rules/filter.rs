use super::ContextRule;
use crate::completion::patterns::{FILTER_FIELD, FILTER_OPERATOR};
use crate::completion::{CompletionContext, CompletionContextKind};
use crate::cursor::CursorContext;

/// `field` and `operator` values of a data source filter.
pub struct DataSourceFilterRule;

impl ContextRule for DataSourceFilterRule {
    fn name(&self) -> &'static str {
        "datasource_filter"
    }

    fn check(&self, ctx: &CursorContext<'_>) -> Option<CompletionContext> {
        if ctx.is_key_position() {
            return None;
        }
        let path = &ctx.path;
        let kind = if path.is_datasource_filter_field() {
            CompletionContextKind::DataSourceFilterField
        } else if path.is_datasource_filter_operator() {
            CompletionContextKind::DataSourceFilterOperator
        } else {
            return None;
        };
        Some(CompletionContext::for_path(kind, path))
    }
}

pub struct DataSourceFilterTextRule;

impl ContextRule for DataSourceFilterTextRule {
    fn name(&self) -> &'static str {
        "datasource_filter"
    }

    fn check(&self, ctx: &CursorContext<'_>) -> Option<CompletionContext> {
        let path = &ctx.path;
        if !path.is_datasource_filter_definition() {
            return None;
        }
        let kind = if FILTER_FIELD.is_match(ctx.text_before) {
            CompletionContextKind::DataSourceFilterField
        } else if FILTER_OPERATOR.is_match(ctx.text_before) {
            CompletionContextKind::DataSourceFilterOperator
        } else {
            return None;
        };
        Some(CompletionContext::for_path(kind, path))
    }
}
