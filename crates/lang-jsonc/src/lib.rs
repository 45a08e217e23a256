mod convert;
pub mod kinds;
pub mod standardize;

use blueprint_api::{DocumentFormat, GrammarAdapter, ParseError, UnifiedTree};
use tree_sitter::{Language, Parser};

pub use standardize::standardize;

/// Grammar adapter for JSON with comments and trailing commas.
///
/// The source is first rewritten by [`standardize`] into plain JSON of the same
/// byte length, so every range reported by the grammar maps back onto the
/// original text unchanged.
pub struct JsoncAdapter {
    language: Language,
}

impl JsoncAdapter {
    pub fn new() -> Result<Self, ParseError> {
        let language: Language = tree_sitter_json::LANGUAGE.into();
        Parser::new().set_language(&language).map_err(|e| ParseError::LanguageInit {
            format: DocumentFormat::Jsonc,
            message: e.to_string(),
        })?;
        Ok(Self { language })
    }
}

impl GrammarAdapter for JsoncAdapter {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Jsonc
    }

    fn parse(&self, source: &str) -> Result<UnifiedTree, ParseError> {
        let plain = standardize(source);
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::LanguageInit {
                format: DocumentFormat::Jsonc,
                message: e.to_string(),
            })?;
        let tree = parser
            .parse(&plain, None)
            .ok_or(ParseError::NoTree(DocumentFormat::Jsonc))?;
        let unified = convert::convert(&tree, &plain);
        tracing::trace!(
            nodes = unified.len(),
            has_error = unified.has_error(),
            "converted jsonc tree"
        );
        Ok(unified)
    }
}
