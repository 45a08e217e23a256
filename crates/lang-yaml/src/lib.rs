mod convert;
pub mod kinds;

use blueprint_api::{DocumentFormat, GrammarAdapter, ParseError, UnifiedTree};
use tree_sitter::{Language, Parser};

/// Grammar adapter for indentation-structured blueprints.
pub struct YamlAdapter {
    language: Language,
}

impl YamlAdapter {
    pub fn new() -> Result<Self, ParseError> {
        let language: Language = tree_sitter_yaml::LANGUAGE.into();
        // Fail fast on an ABI mismatch instead of on the first document.
        Parser::new().set_language(&language).map_err(|e| ParseError::LanguageInit {
            format: DocumentFormat::Yaml,
            message: e.to_string(),
        })?;
        Ok(Self { language })
    }
}

impl GrammarAdapter for YamlAdapter {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Yaml
    }

    fn parse(&self, source: &str) -> Result<UnifiedTree, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::LanguageInit {
                format: DocumentFormat::Yaml,
                message: e.to_string(),
            })?;
        let tree = parser
            .parse(source, None)
            .ok_or(ParseError::NoTree(DocumentFormat::Yaml))?;
        let unified = convert::convert(&tree, source);
        tracing::trace!(
            nodes = unified.len(),
            has_error = unified.has_error(),
            "converted yaml tree"
        );
        Ok(unified)
    }
}
