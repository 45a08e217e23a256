use crate::error::ParseError;
use crate::models::{DocumentFormat, UnifiedTree};

/// Turns raw document text into a [`UnifiedTree`].
///
/// Implementations must be tolerant: any input yields a tree, with broken
/// regions carried as error markers. The returned tree is owned by the caller
/// and never changes afterwards.
pub trait GrammarAdapter: Send + Sync {
    fn format(&self) -> DocumentFormat;

    fn parse(&self, source: &str) -> Result<UnifiedTree, ParseError>;
}
