mod context;
mod duplicates;

use blueprint_api::DocumentFormat;
use blueprint_core::{CoreConfig, DocumentContext};
use blueprint_runtime::AdapterRegistry;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "blueprint-ls",
    version,
    about = "Language server for blueprint documents",
    long_about = "Language server for blueprint documents written in YAML or JSON with comments. \
                  Besides the server itself it offers commands that show how the server \
                  understands a document, for debugging from a terminal."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the Language Server Protocol (LSP) server on stdio
    Lsp,
    /// Show how a cursor position in a document is classified
    #[command(
        long_about = "Resolves a 1-based line and byte column against the document and prints the \
                      structural path, syntactic position, typed prefix and completion context."
    )]
    Context {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// 1-based line number
        #[arg(long)]
        line: usize,
        /// 1-based byte column
        #[arg(long)]
        column: usize,
        /// Visual width of a tab
        #[arg(long)]
        tab_width: Option<usize>,
        /// Columns a node start may be missed by
        #[arg(long)]
        leeway: Option<usize>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List keys defined more than once in the same mapping
    Duplicates {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let component = match &cli.command {
        Commands::Lsp => "lsp",
        _ => "cli",
    };
    let _guard = blueprint_runtime::init_logging(component, !matches!(cli.command, Commands::Lsp));

    match cli.command {
        Commands::Lsp => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(async {
                blueprint_lsp::run_server(Arc::new(blueprint_lsp::NoopCompletionProvider)).await
            })
            .map_err(|e| anyhow::anyhow!("{e}"))?;
            Ok(())
        }
        Commands::Context {
            file,
            line,
            column,
            tab_width,
            leeway,
            json,
        } => {
            let mut config = CoreConfig::default();
            if let Some(width) = tab_width {
                anyhow::ensure!(width > 0, "--tab-width must be at least 1");
                config.tab_width = width;
            }
            if let Some(leeway) = leeway {
                config.position_leeway = leeway;
            }
            let doc = load_document(&file, config)?;
            context::run(&doc, line, column, json)
        }
        Commands::Duplicates { file, json } => {
            let doc = load_document(&file, CoreConfig::default())?;
            duplicates::run(&doc, json)
        }
    }
}

/// Reads `path` and parses it with the adapter its extension selects.
pub fn load_document(path: &Path, config: CoreConfig) -> anyhow::Result<DocumentContext> {
    let format = DocumentFormat::from_path(path)
        .ok_or_else(|| anyhow::anyhow!("unsupported file type: {}", path.display()))?;
    let content = std::fs::read_to_string(path)?;
    let doc = AdapterRegistry::with_default_adapters().open_document(
        path.display().to_string(),
        format,
        config,
        content,
        1,
    )?;
    tracing::debug!(path = %path.display(), status = ?doc.status(), "loaded document");
    Ok(doc)
}
