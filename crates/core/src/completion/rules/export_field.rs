use super::ContextRule;
use crate::completion::patterns::{EXPORT_FIELD_VALUE, NAMESPACE_PROPERTY, NAMESPACE_REF};
use crate::completion::{CompletionContext, CompletionContextKind};
use crate::cursor::CursorContext;

/// The reference in an export's `field`, e.g. `resources.orders.spec.id`.
pub struct ExportFieldRule;

impl ContextRule for ExportFieldRule {
    fn name(&self) -> &'static str {
        "export_field_reference"
    }

    fn check(&self, ctx: &CursorContext<'_>) -> Option<CompletionContext> {
        let path = &ctx.path;
        if !(path.is_export_field() || path.is_export_definition()) {
            return None;
        }

        let typed = match EXPORT_FIELD_VALUE.captures(ctx.text_before) {
            Some(caps) => caps.name("value").map_or("", |m| m.as_str()),
            None if path.is_export_field() && !ctx.is_key_position() => "",
            None => return None,
        };
        Some(classify_reference(typed))
    }
}

fn classify_reference(typed: &str) -> CompletionContext {
    use CompletionContextKind::*;

    if let Some(caps) = NAMESPACE_PROPERTY.captures(typed) {
        let name = &caps["name"];
        return match &caps["ns"] {
            "resources" => CompletionContext::new(ExportFieldResourceProperty).with_resource_name(name),
            "datasources" => {
                CompletionContext::new(ExportFieldDataSourceProperty).with_data_source_name(name)
            }
            "values" => CompletionContext::new(ExportFieldValueProperty),
            "children" => CompletionContext::new(ExportFieldChildProperty).with_child_name(name),
            "variables" => CompletionContext::new(ExportFieldVariableRef),
            _ => CompletionContext::new(ExportField),
        };
    }

    if let Some(caps) = NAMESPACE_REF.captures(typed) {
        let kind = match &caps["ns"] {
            "resources" => ExportFieldResourceRef,
            "datasources" => ExportFieldDataSourceRef,
            "variables" => ExportFieldVariableRef,
            "values" => ExportFieldValueRef,
            "children" => ExportFieldChildRef,
            _ => ExportField,
        };
        return CompletionContext::new(kind);
    }

    CompletionContext::new(ExportField)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_reference() {
        use CompletionContextKind::*;
        assert_eq!(classify_reference("").kind, ExportField);
        assert_eq!(classify_reference("reso").kind, ExportField);
        assert_eq!(classify_reference("resources.").kind, ExportFieldResourceRef);
        let prop = classify_reference("resources.orders.spec.");
        assert_eq!(prop.kind, ExportFieldResourceProperty);
        assert_eq!(prop.resource_name.as_deref(), Some("orders"));
        assert_eq!(
            classify_reference("datasources.net.").data_source_name.as_deref(),
            Some("net")
        );
        assert_eq!(classify_reference("children.core.").child_name.as_deref(), Some("core"));
        assert_eq!(classify_reference("values.lim").kind, ExportFieldValueRef);
        assert_eq!(classify_reference("variables.env").kind, ExportFieldVariableRef);
        assert_eq!(classify_reference("elem.id").kind, ExportField);
    }
}
