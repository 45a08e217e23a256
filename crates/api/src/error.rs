use crate::models::DocumentFormat;

/// Failures surfaced by a grammar adapter.
///
/// Malformed input is never an error: adapters always return a tree and mark the
/// broken regions instead. These variants only cover the grammar itself being unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("failed to load {format} grammar: {message}")]
    LanguageInit {
        format: DocumentFormat,
        message: String,
    },
    #[error("{0} parser produced no tree")]
    NoTree(DocumentFormat),
}
