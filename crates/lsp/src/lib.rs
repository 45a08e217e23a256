pub mod capabilities;
pub mod completion;
pub mod diagnostics;
pub mod symbols;
pub mod util;

pub use completion::{CompletionItemProvider, NoopCompletionProvider};

use blueprint_core::{CompletionContextEngine, CoreConfig, DocumentContext};
use blueprint_runtime::AdapterRegistry;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

pub struct LspServer {
    client: Client,
    registry: AdapterRegistry,
    pub engine: CompletionContextEngine,
    pub provider: Arc<dyn CompletionItemProvider>,
    pub documents: DashMap<Url, DocumentContext>,
    config: RwLock<CoreConfig>,
}

impl LspServer {
    pub fn new(
        client: Client,
        registry: AdapterRegistry,
        provider: Arc<dyn CompletionItemProvider>,
    ) -> Self {
        Self {
            client,
            registry,
            engine: CompletionContextEngine::new(),
            provider,
            documents: DashMap::new(),
            config: RwLock::new(CoreConfig::default()),
        }
    }

    /// Publishes diagnostics for `uri` if it is open.
    async fn publish(&self, uri: &Url) {
        let computed = self
            .documents
            .get(uri)
            .map(|doc| (diagnostics::collect(&doc, uri), doc.version()));
        if let Some((diags, version)) = computed {
            self.client
                .publish_diagnostics(uri.clone(), diags, Some(version))
                .await;
        }
    }

    async fn apply_config(&self, value: Option<serde_json::Value>) {
        match CoreConfig::from_json(value) {
            Ok(config) => {
                for mut doc in self.documents.iter_mut() {
                    doc.set_config(config.clone());
                }
                *self.config.write().await = config;
            }
            Err(e) => {
                tracing::warn!("Ignoring invalid configuration: {}", e);
                self.client
                    .show_message(MessageType::WARNING, format!("blueprint-ls: {}", e))
                    .await;
            }
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for LspServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        self.apply_config(params.initialization_options).await;

        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "blueprint-ls".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            capabilities: capabilities::server_capabilities(),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        tracing::info!(formats = ?self.registry.formats(), "server initialized");
    }

    async fn shutdown(&self) -> Result<()> {
        self.documents.clear();
        Ok(())
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        self.apply_config(Some(params.settings)).await;
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let item = params.text_document;
        let Some(format) = util::format_for(&item.uri, Some(&item.language_id)) else {
            tracing::debug!(uri = %item.uri, language = %item.language_id, "not a blueprint document");
            return;
        };

        let config = self.config.read().await.clone();
        match self
            .registry
            .open_document(item.uri.as_str(), format, config, item.text, item.version)
        {
            Ok(doc) => {
                self.documents.insert(item.uri.clone(), doc);
                self.publish(&item.uri).await;
            }
            Err(e) => tracing::warn!(uri = %item.uri, "Cannot open document: {}", e),
        }
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        let updated = match self.documents.get_mut(&uri) {
            Some(mut doc) => {
                let content = util::apply_changes(doc.content(), &params.content_changes);
                doc.update(content, version);
                true
            }
            None => false,
        };
        if updated {
            self.publish(&uri).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.documents.remove(&uri);
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        let symbols = self
            .documents
            .get(&params.text_document.uri)
            .map(|doc| symbols::document_symbols(&doc));
        Ok(symbols.map(DocumentSymbolResponse::Nested))
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        completion::completion(self, params).await
    }
}

pub async fn run_server(
    provider: Arc<dyn CompletionItemProvider>,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let registry = AdapterRegistry::with_default_adapters();

    let (service, socket) = tower_lsp::LspService::new(move |client| {
        LspServer::new(client, registry.clone(), provider.clone())
    });
    tower_lsp::Server::new(stdin, stdout, socket)
        .serve(service)
        .await;

    Ok(())
}
