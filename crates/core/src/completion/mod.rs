//! Completion-context classification.
//!
//! A [`CursorContext`] is run through an ordered list of [`ContextRule`]s and
//! the first rule that recognises the situation decides the
//! [`CompletionContext`]. Producing the actual suggestions is left to whoever
//! consumes the context.

pub mod kind;
pub mod patterns;
pub mod rules;

pub use kind::CompletionContextKind;
pub use rules::{ContextRule, OrElse};

use crate::cursor::CursorContext;
use crate::document::DocumentContext;
use crate::path::StructuredPath;
use blueprint_api::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionContext {
    pub kind: CompletionContextKind,
    pub resource_name: Option<String>,
    pub data_source_name: Option<String>,
    pub child_name: Option<String>,
    /// Name before an accessor in a namespace-less reference such as `${orders.spec}`.
    pub potential_resource_name: Option<String>,
}

impl CompletionContext {
    pub fn new(kind: CompletionContextKind) -> Self {
        Self {
            kind,
            resource_name: None,
            data_source_name: None,
            child_name: None,
            potential_resource_name: None,
        }
    }

    pub fn unknown() -> Self {
        Self::new(CompletionContextKind::Unknown)
    }

    /// A context carrying the resource and data source names found in `path`.
    pub fn for_path(kind: CompletionContextKind, path: &StructuredPath) -> Self {
        Self {
            resource_name: path.resource_name().map(str::to_string),
            data_source_name: path.data_source_name().map(str::to_string),
            ..Self::new(kind)
        }
    }

    pub fn with_resource_name(mut self, name: impl Into<String>) -> Self {
        self.resource_name = Some(name.into());
        self
    }

    pub fn with_data_source_name(mut self, name: impl Into<String>) -> Self {
        self.data_source_name = Some(name.into());
        self
    }

    pub fn with_child_name(mut self, name: impl Into<String>) -> Self {
        self.child_name = Some(name.into());
        self
    }

    pub fn with_potential_resource_name(mut self, name: impl Into<String>) -> Self {
        self.potential_resource_name = Some(name.into());
        self
    }

    pub fn is_unknown(&self) -> bool {
        self.kind == CompletionContextKind::Unknown
    }
}

/// Ordered rule cascade. Earlier rules win.
pub struct CompletionContextEngine {
    rules: Vec<Box<dyn ContextRule>>,
}

impl Default for CompletionContextEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionContextEngine {
    pub fn new() -> Self {
        Self {
            rules: rules::default_rules(),
        }
    }

    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn push_rule(&mut self, rule: Box<dyn ContextRule>) {
        self.rules.push(rule);
    }

    /// Inserts `rule` ahead of the rule called `before`; appends when no rule has that name.
    pub fn insert_rule_before(&mut self, before: &str, rule: Box<dyn ContextRule>) -> bool {
        match self.rules.iter().position(|r| r.name() == before) {
            Some(at) => {
                self.rules.insert(at, rule);
                true
            }
            None => {
                self.rules.push(rule);
                false
            }
        }
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn classify(&self, ctx: &CursorContext<'_>) -> CompletionContext {
        for rule in &self.rules {
            if let Some(found) = rule.check(ctx) {
                tracing::debug!(rule = rule.name(), kind = %found.kind, "completion rule matched");
                return found;
            }
        }
        CompletionContext::unknown()
    }

    pub fn classify_at(&self, doc: &DocumentContext, pos: Position) -> CompletionContext {
        self.classify(&doc.cursor_context(pos))
    }
}
