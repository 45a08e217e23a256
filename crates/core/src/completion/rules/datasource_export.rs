use super::ContextRule;
use crate::completion::patterns::ALIAS_FOR;
use crate::completion::{CompletionContext, CompletionContextKind};
use crate::cursor::CursorContext;
use crate::syntax::SyntaxStyle;

/// Data source exports: `aliasFor` values, export names and export fields.
pub struct DataSourceExportRule;

impl ContextRule for DataSourceExportRule {
    fn name(&self) -> &'static str {
        "datasource_export"
    }

    fn check(&self, ctx: &CursorContext<'_>) -> Option<CompletionContext> {
        let path = &ctx.path;

        if !ctx.is_key_position()
            && (path.is_datasource_export_alias_for()
                || (path.is_datasource_export_definition() && ALIAS_FOR.is_match(ctx.text_before)))
        {
            return Some(CompletionContext::for_path(
                CompletionContextKind::DataSourceExportAliasForValue,
                path,
            ));
        }

        if !ctx.is_key_position() {
            return None;
        }

        let container = ctx.key_container_path();
        if container.is_datasource_exports() {
            return Some(CompletionContext::for_path(
                CompletionContextKind::DataSourceExportName,
                &container,
            ));
        }
        if !container.is_datasource_export_definition() {
            return None;
        }

        // At the export's own indentation the user is starting a sibling export.
        let sibling = ctx.style() == SyntaxStyle::BlockIndentation
            && ctx
                .key_indent_of(&container)
                .is_some_and(|export_indent| ctx.indent <= export_indent);
        let kind = if sibling {
            CompletionContextKind::DataSourceExportName
        } else {
            CompletionContextKind::DataSourceExportDefinitionField
        };
        Some(CompletionContext::for_path(kind, &container))
    }
}
