use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Concrete syntax a blueprint document is written in.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Yaml,
    Jsonc,
}

impl DocumentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Yaml => "yaml",
            DocumentFormat::Jsonc => "jsonc",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            "json" | "jsonc" => Some(DocumentFormat::Jsonc),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn from_language_id(id: &str) -> Option<Self> {
        match id {
            "yaml" => Some(DocumentFormat::Yaml),
            "json" | "jsonc" => Some(DocumentFormat::Jsonc),
            _ => None,
        }
    }

    /// Whether the format delimits structure with brackets rather than indentation.
    pub fn is_flow(&self) -> bool {
        matches!(self, DocumentFormat::Jsonc)
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
