use blueprint_api::{DocumentFormat, GrammarAdapter};
use blueprint_core::{CoreConfig, CoreError, DocumentContext};
use std::collections::HashMap;
use std::sync::Arc;

/// Grammar adapters keyed by the format they parse.
#[derive(Clone, Default)]
pub struct AdapterRegistry {
    adapters: HashMap<DocumentFormat, Arc<dyn GrammarAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every bundled grammar. A grammar that fails to load is
    /// logged and left out, so documents of that format report as unsupported.
    pub fn with_default_adapters() -> Self {
        let mut registry = Self::new();

        match blueprint_yaml::YamlAdapter::new() {
            Ok(adapter) => registry.register(Arc::new(adapter)),
            Err(e) => tracing::error!("Failed to load YAML grammar: {}", e),
        }
        match blueprint_jsonc::JsoncAdapter::new() {
            Ok(adapter) => registry.register(Arc::new(adapter)),
            Err(e) => tracing::error!("Failed to load JSONC grammar: {}", e),
        }

        registry
    }

    /// Adds `adapter`, replacing any adapter already registered for its format.
    pub fn register(&mut self, adapter: Arc<dyn GrammarAdapter>) {
        self.adapters.insert(adapter.format(), adapter);
    }

    pub fn adapter_for(&self, format: DocumentFormat) -> Result<Arc<dyn GrammarAdapter>, CoreError> {
        self.adapters
            .get(&format)
            .cloned()
            .ok_or_else(|| CoreError::UnsupportedFormat(format.to_string()))
    }

    pub fn formats(&self) -> Vec<DocumentFormat> {
        let mut formats: Vec<DocumentFormat> = self.adapters.keys().copied().collect();
        formats.sort_by_key(|f| f.as_str());
        formats
    }

    /// Parses `content` with the adapter for `format` and wraps it in a fresh context.
    pub fn open_document(
        &self,
        uri: impl Into<String>,
        format: DocumentFormat,
        config: CoreConfig,
        content: impl Into<String>,
        version: i32,
    ) -> Result<DocumentContext, CoreError> {
        let adapter = self.adapter_for(format)?;
        Ok(DocumentContext::open(uri, adapter, config, content, version))
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("formats", &self.formats())
            .finish()
    }
}

/// Initializes the logging system for a specific component.
/// This delegates to the core logging module.
pub fn init_logging(component: &str, to_stderr: bool) -> Option<impl Drop> {
    Some(blueprint_core::logging::init_logging(component, to_stderr))
}
