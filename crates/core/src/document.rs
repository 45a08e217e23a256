use crate::config::CoreConfig;
use crate::cursor::CursorContext;
use crate::duplicates::{DuplicateKey, find_duplicate_keys};
use crate::index::PositionIndex;
use crate::path::StructuredPath;
use blueprint_api::{
    DocumentFormat, GrammarAdapter, NodeId, ParseError, Position, SchemaNode, SchemaTree,
    UnifiedTree,
};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentStatus {
    /// The latest parse produced an error-free tree.
    Valid,
    /// The latest tree carries errors; an older valid tree is still available.
    ParsingErrors,
    /// The latest parse produced no tree; an older valid tree is still available.
    Degraded,
    /// Nothing has ever parsed without errors.
    Unavailable,
}

/// One immutable parse result together with its lookup index.
#[derive(Debug)]
pub struct ParseSnapshot {
    pub version: i32,
    pub tree: UnifiedTree,
    pub index: PositionIndex,
}

impl ParseSnapshot {
    pub fn new(tree: UnifiedTree, version: i32) -> Self {
        let index = PositionIndex::build(&tree);
        Self {
            version,
            tree,
            index,
        }
    }

    pub fn has_error(&self) -> bool {
        self.tree.has_error()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    Current,
    LastValid,
    Schema,
    Indentation,
    Unresolved,
}

/// Result of placing a cursor against the document's trees.
#[derive(Debug, Clone)]
pub struct Resolution<'a> {
    pub snapshot: Option<&'a ParseSnapshot>,
    pub node: Option<NodeId>,
    pub path: StructuredPath,
    pub source: ResolutionSource,
    /// Set when the answer came from something other than the latest parse.
    pub stale: bool,
    pub schema_node: Option<&'a SchemaNode>,
}

/// Everything known about one open document.
///
/// Text is replaced wholesale on each update and reparsed. The newest tree is
/// kept as `current`; the newest tree without errors is kept as `last_valid`
/// so cursor resolution keeps working while the user is mid-edit.
pub struct DocumentContext {
    uri: String,
    format: DocumentFormat,
    content: String,
    version: i32,
    adapter: Arc<dyn GrammarAdapter>,
    config: CoreConfig,
    current: Option<Arc<ParseSnapshot>>,
    last_valid: Option<Arc<ParseSnapshot>>,
    last_error: Option<ParseError>,
    status: DocumentStatus,
    schema: Option<SchemaTree>,
    schema_version: Option<i32>,
}

impl DocumentContext {
    pub fn open(
        uri: impl Into<String>,
        adapter: Arc<dyn GrammarAdapter>,
        config: CoreConfig,
        content: impl Into<String>,
        version: i32,
    ) -> Self {
        let mut doc = Self {
            uri: uri.into(),
            format: adapter.format(),
            content: content.into(),
            version,
            adapter,
            config,
            current: None,
            last_valid: None,
            last_error: None,
            status: DocumentStatus::Unavailable,
            schema: None,
            schema_version: None,
        };
        doc.reparse();
        doc
    }

    /// Replaces the text and reparses.
    ///
    /// Versions older than the one held are ignored, as is a same-version
    /// update carrying identical text.
    pub fn update(&mut self, content: impl Into<String>, version: i32) -> DocumentStatus {
        let content = content.into();
        if version < self.version {
            tracing::debug!(
                uri = %self.uri,
                held = self.version,
                incoming = version,
                "ignoring stale document update"
            );
            return self.status;
        }
        if version == self.version && content == self.content {
            return self.status;
        }
        self.content = content;
        self.version = version;
        self.reparse();
        self.status
    }

    fn reparse(&mut self) {
        let previous = self.status;
        match self.adapter.parse(&self.content) {
            Ok(tree) => {
                let snapshot = Arc::new(ParseSnapshot::new(tree, self.version));
                self.last_error = None;
                if snapshot.has_error() {
                    self.status = if self.last_valid.is_some() {
                        DocumentStatus::ParsingErrors
                    } else {
                        DocumentStatus::Unavailable
                    };
                } else {
                    self.last_valid = Some(snapshot.clone());
                    self.status = DocumentStatus::Valid;
                }
                self.current = Some(snapshot);
            }
            Err(e) => {
                tracing::warn!(uri = %self.uri, "parse failed: {}", e);
                self.current = None;
                self.last_error = Some(e);
                self.status = if self.last_valid.is_some() {
                    DocumentStatus::Degraded
                } else {
                    DocumentStatus::Unavailable
                };
            }
        }
        if previous != self.status {
            tracing::debug!(
                uri = %self.uri,
                version = self.version,
                "document status {:?} -> {:?}",
                previous,
                self.status
            );
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn status(&self) -> DocumentStatus {
        self.status
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: CoreConfig) {
        self.config = config;
    }

    pub fn current(&self) -> Option<&ParseSnapshot> {
        self.current.as_deref()
    }

    pub fn last_valid(&self) -> Option<&ParseSnapshot> {
        self.last_valid.as_deref()
    }

    pub fn last_error(&self) -> Option<&ParseError> {
        self.last_error.as_ref()
    }

    /// The tree structural fallbacks should trust: the current one when it is
    /// clean, otherwise the last valid one.
    pub fn candidate_snapshot(&self) -> Option<&ParseSnapshot> {
        match self.current() {
            Some(current) if !current.has_error() => Some(current),
            _ => self.last_valid().or(self.current()),
        }
    }

    pub fn set_schema(&mut self, schema: SchemaTree, version: i32) {
        self.schema = Some(schema);
        self.schema_version = Some(version);
    }

    pub fn clear_schema(&mut self) {
        self.schema = None;
        self.schema_version = None;
    }

    pub fn schema(&self) -> Option<&SchemaTree> {
        self.schema.as_ref()
    }

    pub fn schema_is_current(&self) -> bool {
        self.schema_version == Some(self.version)
    }

    /// Places `pos` against the current tree, then the last valid tree, then
    /// the schema tree. A hit on the bare document root counts as no hit,
    /// but it is still returned when nothing more specific exists.
    pub fn resolve(&self, pos: Position) -> Resolution<'_> {
        let leeway = self.config.position_leeway;
        let specific = |snapshot: &ParseSnapshot| {
            snapshot
                .index
                .deepest_node_at(pos, leeway)
                .filter(|id| *id != snapshot.tree.root_id())
        };

        if let Some(current) = self.current() {
            if let Some(id) = specific(current) {
                return self.resolution(current, id, ResolutionSource::Current, false);
            }
        }

        if let Some(last_valid) = self.last_valid.as_ref() {
            let same = self
                .current
                .as_ref()
                .is_some_and(|c| Arc::ptr_eq(c, last_valid));
            if !same {
                if let Some(id) = specific(last_valid) {
                    return self.resolution(last_valid, id, ResolutionSource::LastValid, true);
                }
            }
        }

        if self.config.schema_fallback {
            if let Some(node) = self.schema().and_then(|s| s.deepest_at(pos, leeway)) {
                return Resolution {
                    snapshot: None,
                    node: None,
                    path: StructuredPath::parse(&node.path),
                    source: ResolutionSource::Schema,
                    stale: !self.schema_is_current(),
                    schema_node: Some(node),
                };
            }
        }

        match self.current().or(self.last_valid()) {
            Some(snapshot) => {
                let root = snapshot.tree.root_id();
                let stale = self.current().is_none();
                self.resolution(snapshot, root, ResolutionSource::Current, stale)
            }
            None => Resolution {
                snapshot: None,
                node: None,
                path: StructuredPath::default(),
                source: ResolutionSource::Unresolved,
                stale: false,
                schema_node: None,
            },
        }
    }

    fn resolution<'a>(
        &'a self,
        snapshot: &'a ParseSnapshot,
        id: NodeId,
        source: ResolutionSource,
        stale: bool,
    ) -> Resolution<'a> {
        Resolution {
            snapshot: Some(snapshot),
            node: Some(id),
            path: StructuredPath::from_node(&snapshot.tree, id),
            source,
            stale,
            schema_node: None,
        }
    }

    pub fn cursor_context(&self, pos: Position) -> CursorContext<'_> {
        CursorContext::build(self, pos)
    }

    /// Keys repeated within one mapping of the current tree, or of the last
    /// valid one when the latest parse produced no tree.
    pub fn duplicate_keys(&self) -> Vec<DuplicateKey> {
        self.current()
            .or(self.last_valid())
            .map(|s| find_duplicate_keys(&s.tree))
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for DocumentContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentContext")
            .field("uri", &self.uri)
            .field("format", &self.format)
            .field("version", &self.version)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}
