//! Classification rules, tried in priority order.
//!
//! Each rule implements [`ContextRule`] and can be chained with `or_else()`.

mod array;
mod datasource_export;
mod export_field;
mod filter;
mod key;
mod substitution;
mod type_field;
mod value;

pub use array::ArrayValueRule;
pub use datasource_export::DataSourceExportRule;
pub use export_field::ExportFieldRule;
pub use filter::{DataSourceFilterRule, DataSourceFilterTextRule};
pub use key::DefinitionFieldRule;
pub use substitution::SubstitutionRule;
pub use type_field::{TypeFieldRule, TypeFieldTextRule};
pub use value::ValuePositionRule;

use super::CompletionContext;
use crate::cursor::CursorContext;

/// One recogniser in the classification cascade.
pub trait ContextRule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns `None` when the rule does not apply at this cursor.
    fn check(&self, ctx: &CursorContext<'_>) -> Option<CompletionContext>;

    /// Try `other` when `self` does not apply. The pair keeps `self`'s name.
    fn or_else<R: ContextRule>(self, other: R) -> OrElse<Self, R>
    where
        Self: Sized,
    {
        OrElse {
            first: self,
            second: other,
        }
    }
}

pub struct OrElse<A, B> {
    first: A,
    second: B,
}

impl<A: ContextRule, B: ContextRule> ContextRule for OrElse<A, B> {
    fn name(&self) -> &'static str {
        self.first.name()
    }

    fn check(&self, ctx: &CursorContext<'_>) -> Option<CompletionContext> {
        self.first.check(ctx).or_else(|| self.second.check(ctx))
    }
}

/// The standard cascade, highest priority first.
pub fn default_rules() -> Vec<Box<dyn ContextRule>> {
    vec![
        Box::new(TypeFieldRule.or_else(TypeFieldTextRule)),
        Box::new(DataSourceFilterRule.or_else(DataSourceFilterTextRule)),
        Box::new(DataSourceExportRule),
        Box::new(ExportFieldRule),
        Box::new(SubstitutionRule),
        Box::new(ValuePositionRule),
        Box::new(ArrayValueRule),
        Box::new(DefinitionFieldRule),
    ]
}

/// Whether the cursor is inside an unclosed `${`.
pub(crate) fn in_substitution(ctx: &CursorContext<'_>) -> bool {
    super::patterns::open_substitution(ctx.text_before).is_some()
}
