use crate::LspServer;
use crate::util::to_core_position;
use blueprint_core::{CompletionContext, CursorContext};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;

/// Turns a classified cursor into completion items.
///
/// The server only decides *what* is being completed; item catalogues
/// (resource types, spec fields, references) live behind this trait.
pub trait CompletionItemProvider: Send + Sync {
    fn provide(&self, context: &CompletionContext, cursor: &CursorContext<'_>) -> Vec<CompletionItem>;
}

/// Offers nothing. Useful for running the server purely for diagnostics.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCompletionProvider;

impl CompletionItemProvider for NoopCompletionProvider {
    fn provide(&self, _context: &CompletionContext, _cursor: &CursorContext<'_>) -> Vec<CompletionItem> {
        Vec::new()
    }
}

pub async fn completion(
    server: &LspServer,
    params: CompletionParams,
) -> Result<Option<CompletionResponse>> {
    let uri = &params.text_document_position.text_document.uri;
    let pos = params.text_document_position.position;

    let Some(doc) = server.documents.get(uri) else {
        return Ok(None);
    };
    let position = to_core_position(doc.content(), pos);
    let cursor = doc.cursor_context(position);
    let context = server.engine.classify(&cursor);
    tracing::debug!(
        uri = %uri,
        path = %cursor.path,
        kind = %context.kind,
        "completion context"
    );

    if context.is_unknown() {
        return Ok(None);
    }
    let items = server.provider.provide(&context, &cursor);
    if items.is_empty() {
        Ok(None)
    } else {
        Ok(Some(CompletionResponse::Array(items)))
    }
}
