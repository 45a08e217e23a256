use super::ContextRule;
use crate::completion::patterns::{
    BARE_PROPERTY, NAMESPACE_PROPERTY, NAMESPACE_REF, RESERVED_NAMES, open_substitution,
    trailing_reference,
};
use crate::completion::{CompletionContext, CompletionContextKind};
use crate::cursor::CursorContext;

/// Anything inside an unclosed `${`.
pub struct SubstitutionRule;

impl ContextRule for SubstitutionRule {
    fn name(&self) -> &'static str {
        "substitution"
    }

    fn check(&self, ctx: &CursorContext<'_>) -> Option<CompletionContext> {
        let expr = open_substitution(ctx.text_before)?;
        if expr.trim().is_empty() {
            return Some(CompletionContext::new(CompletionContextKind::StringSubOpen));
        }

        let reference = trailing_reference(expr);
        if let Some(found) = namespaced(reference) {
            return Some(found);
        }

        if let Some(caps) = BARE_PROPERTY.captures(reference) {
            if let Some(resource) = ctx.schema_element.and_then(|e| e.resource_property_name()) {
                return Some(
                    CompletionContext::new(CompletionContextKind::StringSubResourceProperty)
                        .with_resource_name(resource),
                );
            }
            let name = &caps["name"];
            if !RESERVED_NAMES.contains(&name) {
                return Some(
                    CompletionContext::new(CompletionContextKind::StringSubPotentialResourceProperty)
                        .with_potential_resource_name(name),
                );
            }
        }

        Some(CompletionContext::new(CompletionContextKind::StringSub))
    }
}

fn namespaced(reference: &str) -> Option<CompletionContext> {
    use CompletionContextKind::*;

    if let Some(caps) = NAMESPACE_PROPERTY.captures(reference) {
        let name = &caps["name"];
        let found = match &caps["ns"] {
            "resources" => CompletionContext::new(StringSubResourceProperty).with_resource_name(name),
            "datasources" => {
                CompletionContext::new(StringSubDataSourceProperty).with_data_source_name(name)
            }
            "children" => CompletionContext::new(StringSubChildProperty).with_child_name(name),
            "variables" => CompletionContext::new(StringSubVariableProperty),
            "values" => CompletionContext::new(StringSubValueProperty),
            "elem" => CompletionContext::new(StringSubElemProperty),
            _ => return None,
        };
        return Some(found);
    }

    let caps = NAMESPACE_REF.captures(reference)?;
    let kind = match &caps["ns"] {
        "resources" => StringSubResourceRef,
        "datasources" => StringSubDataSourceRef,
        "children" => StringSubChildRef,
        "variables" => StringSubVariableRef,
        "values" => StringSubValueRef,
        "elem" => StringSubElemRef,
        _ => return None,
    };
    Some(CompletionContext::new(kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaced_references() {
        use CompletionContextKind::*;
        assert_eq!(namespaced("resources.").map(|c| c.kind), Some(StringSubResourceRef));
        assert_eq!(namespaced("elem.").map(|c| c.kind), Some(StringSubElemRef));
        let prop = namespaced("resources.orders.spec.").unwrap();
        assert_eq!(prop.kind, StringSubResourceProperty);
        assert_eq!(prop.resource_name.as_deref(), Some("orders"));
        assert_eq!(
            namespaced("children.core[0].").map(|c| c.kind),
            Some(StringSubChildProperty)
        );
        assert_eq!(namespaced("values.x.y").map(|c| c.kind), Some(StringSubValueProperty));
        assert!(namespaced("orders.spec").is_none());
    }
}
